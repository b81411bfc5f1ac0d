use std::io::Write;

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

use crate::schema::FieldList;
use crate::value::{DecodedRecord, DecodedValue};

/// Column value for a field missing from the record.
const ABSENT: &[u8] = b"-";

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("write: {0}")]
    Io(#[from] std::io::Error),
}

/// Render one TSV line: epoch seconds, then one column per field after index 0.
///
/// No header, no trailing tab, no newline.
pub fn emit_line(
    ts: &DateTime<Utc>,
    fields: FieldList,
    record: &DecodedRecord,
) -> Result<Vec<u8>, EmitError> {
    let mut line = Vec::with_capacity(fields.len() * 16);
    write_epoch(&mut line, ts)?;
    for name in fields.iter().skip(1) {
        line.push(b'\t');
        match record.get(name) {
            Some(value) => write_value(&mut line, value)?,
            None => line.extend_from_slice(ABSENT),
        }
    }
    Ok(line)
}

/// Seconds since the Unix epoch with exactly six fractional digits,
/// rounded to the nearest microsecond.
fn write_epoch(out: &mut Vec<u8>, ts: &DateTime<Utc>) -> std::io::Result<()> {
    let nanos = i128::from(ts.timestamp()) * 1_000_000_000 + i128::from(ts.timestamp_subsec_nanos());
    let micros = if nanos >= 0 {
        (nanos + 500) / 1_000
    } else {
        (nanos - 500) / 1_000
    };
    let sign = if micros < 0 { "-" } else { "" };
    let abs = micros.unsigned_abs();
    write!(out, "{sign}{}.{:06}", abs / 1_000_000, abs % 1_000_000)
}

fn write_value(out: &mut Vec<u8>, value: DecodedValue<'_>) -> Result<(), EmitError> {
    match value {
        DecodedValue::Number(n) => write_number(out, n)?,
        other => write_text(out, other)?,
    }
    Ok(())
}

/// Plain text form shared by top-level non-numbers and nested values.
///
/// Strings stay unquoted, null is `<nil>`, arrays are `[a b]` and objects are
/// `map[k:v]` with keys sorted. Nested numbers use the shortest form.
fn write_text(out: &mut Vec<u8>, value: DecodedValue<'_>) -> std::io::Result<()> {
    match value {
        DecodedValue::Number(n) => write_shortest(out, n),
        DecodedValue::String(s) => out.write_all(s.as_bytes()),
        DecodedValue::Boolean(b) => write!(out, "{b}"),
        DecodedValue::Null => out.write_all(b"<nil>"),
        DecodedValue::Array(items) => write_array(out, items),
        DecodedValue::Object(map) => write_object(out, map),
    }
}

fn write_array(out: &mut Vec<u8>, items: &[Value]) -> std::io::Result<()> {
    out.push(b'[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(b' ');
        }
        write_text(out, DecodedValue::from(item))?;
    }
    out.push(b']');
    Ok(())
}

fn write_object(out: &mut Vec<u8>, map: &Map<String, Value>) -> std::io::Result<()> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    out.extend_from_slice(b"map[");
    for (i, (key, item)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(b' ');
        }
        write!(out, "{key}:")?;
        write_text(out, DecodedValue::from(item))?;
    }
    out.push(b']');
    Ok(())
}

/// Shortest round-trip digits; exponent form (`1e+06`, `1e-05`) outside 1e-4..1e6.
fn write_shortest(out: &mut Vec<u8>, n: &Number) -> std::io::Result<()> {
    let Some(f) = n.as_f64() else {
        return write!(out, "{n}");
    };
    let sci = format!("{f:e}");
    let parts = sci
        .split_once('e')
        .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)));
    match parts {
        Some((mantissa, exp)) if f != 0.0 && !(-4..6).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(out, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        _ => write!(out, "{f}"),
    }
}

/// Integral values print without a decimal point, everything else with five digits.
fn write_number(out: &mut Vec<u8>, n: &Number) -> std::io::Result<()> {
    if let Some(i) = n.as_i64() {
        write!(out, "{i}")
    } else if let Some(u) = n.as_u64() {
        write!(out, "{u}")
    } else if let Some(f) = n.as_f64() {
        if f.fract() == 0.0 {
            // + 0.0 turns -0.0 into 0.0
            write!(out, "{:.0}", f + 0.0)
        } else {
            write!(out, "{f:.5}")
        }
    } else {
        write!(out, "{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch(ts: DateTime<Utc>) -> String {
        let mut out = Vec::new();
        write_epoch(&mut out, &ts).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn column(json: &str) -> String {
        let rec = DecodedRecord::decode(format!(r#"{{"v":{json}}}"#).as_bytes()).unwrap();
        let mut out = Vec::new();
        write_value(&mut out, rec.get("v").unwrap()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn epoch_has_six_fractional_digits() {
        let ts = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(epoch(ts), "1609459200.000000");

        let ts = DateTime::parse_from_rfc3339("2021-01-01T00:00:00.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(epoch(ts), "1609459200.123456");
    }

    #[test]
    fn epoch_rounds_to_nearest_microsecond() {
        let ts = DateTime::parse_from_rfc3339("2021-01-01T00:00:00.9999996Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(epoch(ts), "1609459201.000000");

        let ts = DateTime::parse_from_rfc3339("2021-01-01T00:00:00.0000004Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(epoch(ts), "1609459200.000000");
    }

    #[test]
    fn epoch_before_1970_keeps_sign() {
        let ts = DateTime::parse_from_rfc3339("1969-12-31T23:59:59.5Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(epoch(ts), "-0.500000");
    }

    #[test]
    fn integral_numbers_have_no_decimal_point() {
        assert_eq!(column("5"), "5");
        assert_eq!(column("-42"), "-42");
        assert_eq!(column("5.0"), "5");
        assert_eq!(column("-0.0"), "0");
        assert_eq!(column("18446744073709551615"), "18446744073709551615");
        assert_eq!(column("1e3"), "1000");
    }

    #[test]
    fn fractional_numbers_have_five_digits() {
        assert_eq!(column("5.5"), "5.50000");
        assert_eq!(column("0.000123"), "0.00012");
        assert_eq!(column("-1.25"), "-1.25000");
    }

    #[test]
    fn non_numbers_use_their_text() {
        assert_eq!(column(r#""S0""#), "S0");
        assert_eq!(column(r#""""#), "");
        assert_eq!(column("true"), "true");
        assert_eq!(column("false"), "false");
        assert_eq!(column("null"), "<nil>");
    }

    #[test]
    fn arrays_are_space_separated() {
        assert_eq!(column(r#"["1.1.1.1","8.8.8.8"]"#), "[1.1.1.1 8.8.8.8]");
        assert_eq!(column("[300.0,60.5]"), "[300 60.5]");
        assert_eq!(column("[]"), "[]");
        assert_eq!(column("[true,null,[1,2]]"), "[true <nil> [1 2]]");
    }

    #[test]
    fn nested_numbers_use_shortest_form() {
        assert_eq!(column("[1000000,123456.5,0.0001,0.00001,-2.5e-7]"), "[1e+06 123456.5 0.0001 1e-05 -2.5e-07]");
        assert_eq!(column("[1e21,0]"), "[1e+21 0]");
    }

    #[test]
    fn objects_list_sorted_keys() {
        assert_eq!(column(r#"{"b":[1],"a":"x"}"#), "map[a:x b:[1]]");
        assert_eq!(column(r#"{"k":{"n":null}}"#), "map[k:map[n:<nil>]]");
        assert_eq!(column("{}"), "map[]");
    }

    #[test]
    fn absent_fields_render_as_dash() {
        let ts = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let rec = DecodedRecord::decode(br#"{"uid":"abc","n":7}"#).unwrap();
        let line = emit_line(&ts, &["ts", "uid", "missing", "n"], &rec).unwrap();
        assert_eq!(line, b"1609459200.000000\tabc\t-\t7");
    }

    #[test]
    fn timestamp_column_ignores_payload_ts() {
        let ts = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let rec = DecodedRecord::decode(br#"{"ts":"not used"}"#).unwrap();
        let line = emit_line(&ts, &["ts"], &rec).unwrap();
        assert_eq!(line, b"1609459200.000000");
    }
}
