//! Functions available to theme templates.
//!
//! | Name | Result |
//! |------|--------|
//! | `add`, `sub`, `mul`, `div` | integer arithmetic |
//! | `seq(n)` | `n` placeholders, for fixed-count loops |
//! | `commalist(list)` | items joined with `,` |
//! | `year`, `month`, `day` | component of a `YYYY-MM-DD` date, `""` if malformed |
//! | `nowJP()` | today as `2024年 6月 5日` |
//! | `age(birthDate)` | age in whole years, `0` if malformed |
//! | `ruby(name, reading)` | name fragments paired with their readings |

use crate::domain::model::RubyPair;
use crate::domain::ports::Clock;
use chrono::{Datelike, NaiveDate};
use minijinja::value::Value;
use minijinja::{Environment, Error, ErrorKind};
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// Names installed by [`HelperSet::install`].
pub const HELPER_NAMES: [&str; 12] = [
    "add",
    "sub",
    "mul",
    "div",
    "seq",
    "commalist",
    "year",
    "month",
    "day",
    "nowJP",
    "age",
    "ruby",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

// 半形空白或全形空白 (U+3000)
static NAME_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[ \u{3000}]+").expect("separator pattern is valid"));

// chrono 的 %m/%d 接受一位數、前置空白與 + 號，先確認格式
static STRICT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// The fixed helper table. Only the clock varies between instances.
#[derive(Clone)]
pub struct HelperSet {
    clock: Arc<dyn Clock>,
}

impl HelperSet {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn install(&self, env: &mut Environment<'_>) {
        env.add_function("add", |a: i64, b: i64| arith("add", a.checked_add(b)));
        env.add_function("sub", |a: i64, b: i64| arith("sub", a.checked_sub(b)));
        env.add_function("mul", |a: i64, b: i64| arith("mul", a.checked_mul(b)));
        env.add_function("div", div);
        env.add_function("seq", seq);
        env.add_function("commalist", |list: Option<Vec<String>>| {
            commalist(&list.unwrap_or_default())
        });
        env.add_function("year", |s: Option<String>| year(s.as_deref().unwrap_or("")));
        env.add_function("month", |s: Option<String>| month(s.as_deref().unwrap_or("")));
        env.add_function("day", |s: Option<String>| day(s.as_deref().unwrap_or("")));

        let clock = Arc::clone(&self.clock);
        env.add_function("nowJP", move || now_jp(clock.today()));

        let clock = Arc::clone(&self.clock);
        env.add_function("age", move |s: Option<String>| {
            age(s.as_deref().unwrap_or(""), clock.today())
        });

        env.add_function("ruby", |name: Option<String>, reading: Option<String>| {
            ruby(
                name.as_deref().unwrap_or(""),
                reading.as_deref().unwrap_or(""),
            )
            .iter()
            .map(Value::from_serialize)
            .collect::<Vec<_>>()
        });
    }
}

fn arith(op: &str, result: Option<i64>) -> Result<i64, Error> {
    result.ok_or_else(|| Error::new(ErrorKind::InvalidOperation, format!("{} overflowed", op)))
}

pub fn div(a: i64, b: i64) -> Result<i64, Error> {
    if b == 0 {
        return Err(Error::new(ErrorKind::InvalidOperation, "division by zero"));
    }
    arith("div", a.checked_div(b))
}

pub fn seq(n: i64) -> Vec<Value> {
    let len = usize::try_from(n).unwrap_or(0);
    vec![Value::from(()); len]
}

pub fn commalist(items: &[String]) -> String {
    items.join(",")
}

fn parse_date(field: &str, s: &str) -> Option<NaiveDate> {
    if !STRICT_DATE.is_match(s) {
        tracing::warn!("fail to get {} : {} : not a YYYY-MM-DD date", field, s);
        return None;
    }
    match NaiveDate::parse_from_str(s, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("fail to get {} : {} : {}", field, s, e);
            None
        }
    }
}

pub fn year(s: &str) -> String {
    parse_date("year", s)
        .map(|d| d.year().to_string())
        .unwrap_or_default()
}

pub fn month(s: &str) -> String {
    parse_date("month", s)
        .map(|d| d.month().to_string())
        .unwrap_or_default()
}

pub fn day(s: &str) -> String {
    parse_date("day", s)
        .map(|d| d.day().to_string())
        .unwrap_or_default()
}

/// Month and day are right-aligned in two columns with a space, not a zero.
pub fn now_jp(today: NaiveDate) -> String {
    format!("{}年{:>2}月{:>2}日", today.year(), today.month(), today.day())
}

fn as_yyyymmdd(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

/// `(today - birth) / 10000` on the `YYYYMMDD` integers.
pub fn age(birth_date: &str, today: NaiveDate) -> i64 {
    match parse_date("birthday", birth_date) {
        Some(birth) => (as_yyyymmdd(today) - as_yyyymmdd(birth)) / 10000,
        None => 0,
    }
}

pub fn ruby(name: &str, reading: &str) -> Vec<RubyPair> {
    let name = name.trim_matches(|c| c == ' ' || c == '\u{3000}');
    if name.is_empty() {
        return Vec::new();
    }

    let reading = reading.trim_matches(|c| c == ' ' || c == '\u{3000}');
    let readings: Vec<&str> = if reading.is_empty() {
        Vec::new()
    } else {
        NAME_SEPARATOR.split(reading).collect()
    };

    NAME_SEPARATOR
        .split(name)
        .enumerate()
        .map(|(i, part)| RubyPair {
            name: part.to_string(),
            ruby: readings.get(i).map(|r| r.to_string()).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixedClock;
    use minijinja::context;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pair(name: &str, ruby: &str) -> RubyPair {
        RubyPair {
            name: name.to_string(),
            ruby: ruby.to_string(),
        }
    }

    #[test]
    fn test_ruby_aligns_tokens() {
        assert_eq!(
            ruby("John Smith", "ジョン スミス"),
            vec![pair("John", "ジョン"), pair("Smith", "スミス")]
        );
        assert_eq!(
            ruby("A B C", "X"),
            vec![pair("A", "X"), pair("B", ""), pair("C", "")]
        );
    }

    #[test]
    fn test_ruby_full_width_space_and_runs() {
        assert_eq!(
            ruby("山田\u{3000}太郎", "やまだ  たろう"),
            vec![pair("山田", "やまだ"), pair("太郎", "たろう")]
        );
        assert!(ruby("", "やまだ").is_empty());
        assert_eq!(ruby("山田", ""), vec![pair("山田", "")]);
    }

    #[test]
    fn test_age_truncates() {
        assert_eq!(age("2000-01-01", date(2024, 6, 15)), 24);
        // 生日前一天
        assert_eq!(age("2000-06-16", date(2024, 6, 15)), 23);
        assert_eq!(age("2000-06-15", date(2024, 6, 15)), 24);
        assert_eq!(age("June 2000", date(2024, 6, 15)), 0);
        assert_eq!(age("2000-1-1", date(2024, 6, 15)), 0);
        assert_eq!(age(" 2000-01-01", date(2024, 6, 15)), 0);
        assert_eq!(age("+2000-01-01", date(2024, 6, 15)), 0);
    }

    #[test]
    fn test_div() {
        assert_eq!(div(10, 3).unwrap(), 3);
        let err = div(4, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_seq() {
        assert_eq!(seq(3).len(), 3);
        assert!(seq(0).is_empty());
        assert!(seq(-2).is_empty());
    }

    #[test]
    fn test_date_parts() {
        assert_eq!(year("2019-04-01"), "2019");
        assert_eq!(month("2019-04-01"), "4");
        assert_eq!(day("2019-04-01"), "1");
        assert_eq!(month("2019-04"), "");
        assert_eq!(day(""), "");
        for loose in ["2019-4-1", " 2019-04-01", "+2019-04-01", "2019-04-01 "] {
            assert_eq!(year(loose), "", "{:?}", loose);
            assert_eq!(month(loose), "", "{:?}", loose);
            assert_eq!(day(loose), "", "{:?}", loose);
        }
        assert_eq!(day("2019-02-30"), "");
    }

    #[test]
    fn test_now_jp_pads_with_spaces() {
        assert_eq!(now_jp(date(2024, 6, 5)), "2024年 6月 5日");
        assert_eq!(now_jp(date(2024, 12, 25)), "2024年12月25日");
    }

    #[test]
    fn test_commalist() {
        let items = vec!["Rust".to_string(), "Go".to_string()];
        assert_eq!(commalist(&items), "Rust,Go");
        assert_eq!(commalist(&[]), "");
    }

    #[test]
    fn test_install_in_environment() {
        let mut env = Environment::new();
        HelperSet::new(Arc::new(FixedClock(date(2024, 6, 15)))).install(&mut env);

        let out = env
            .render_str(
                "{{ add(1, 2) }}|{{ mul(3, 4) }}|{{ age('2000-01-01') }}|{{ nowJP() }}|\
                 {% for i in seq(3) %}*{% endfor %}|\
                 {% for p in ruby('John Smith', 'ジョン スミス') %}{{ p.name }}:{{ p.ruby }};{% endfor %}",
                context! {},
            )
            .unwrap();
        assert_eq!(out, "3|12|24|2024年 6月15日|***|John:ジョン;Smith:スミス;");

        assert!(env.render_str("{{ div(4, 0) }}", context! {}).is_err());

        for name in HELPER_NAMES {
            let defined = env
                .render_str(&format!("{{{{ {} is defined }}}}", name), context! {})
                .unwrap();
            assert_eq!(defined, "true", "{} is not installed", name);
        }
    }
}
