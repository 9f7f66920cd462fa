//! Human-readable dump of a saved payload.

use std::fmt;

use chrono::NaiveDateTime;
use zc_form::{ExtraChargePayload, RateAreaCharges};

pub const REPORT_TITLE: &str = "Report generated: ";

/// Timestamp layout of the report title for a locale tag.
pub fn date_format(locale: &str) -> &'static str {
    let mut parts = locale.split(['-', '_']);
    let language = parts.next().unwrap_or_default().to_ascii_lowercase();
    let region = parts.next().unwrap_or_default().to_ascii_uppercase();
    match (language.as_str(), region.as_str()) {
        ("ru" | "de" | "uk" | "be" | "kk", _) => "%d.%m.%Y %H:%M:%S",
        ("en", "US") => "%m/%d/%Y %I:%M:%S %p",
        _ => "%Y-%m-%d %H:%M:%S",
    }
}

/// A payload dump stamped with its generation time.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub payload: &'a [RateAreaCharges],
    pub generated_at: NaiveDateTime,
    pub locale: &'a str,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{REPORT_TITLE}{}",
            self.generated_at.format(date_format(self.locale))
        )?;

        for (i, area) in self.payload.iter().enumerate() {
            open(f, 0)?;
            entry(f, 2, "rate_area_id", &area.rate_area_id)?;
            entry(f, 2, "base_charge_value", &area.base_charge_value)?;
            if area.extra_charges.is_empty() {
                entry(f, 2, "extra_charges", &"[]")?;
            } else {
                writeln!(f, "{:2}extra_charges: [", "")?;
                for (j, extra) in area.extra_charges.iter().enumerate() {
                    extra_charge(f, 4, extra)?;
                    close(f, 4, j + 1 < area.extra_charges.len())?;
                }
                writeln!(f, "{:2}],", "")?;
            }
            close(f, 0, i + 1 < self.payload.len())?;
        }
        Ok(())
    }
}

/// Render `payload` under a title stamped with `generated_at`.
pub fn render_report(
    payload: &[RateAreaCharges],
    generated_at: NaiveDateTime,
    locale: &str,
) -> String {
    Report {
        payload,
        generated_at,
        locale,
    }
    .to_string()
}

fn extra_charge(
    f: &mut fmt::Formatter<'_>,
    indent: usize,
    extra: &ExtraChargePayload,
) -> fmt::Result {
    open(f, indent)?;
    entry(f, indent + 2, "charge_value", &extra.charge_value)?;
    entry(f, indent + 2, "min_weight", &extra.min_weight)?;
    entry(f, indent + 2, "max_weight", &extra.max_weight)
}

fn open(f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    writeln!(f, "{:indent$}{{", "")
}

fn close(f: &mut fmt::Formatter<'_>, indent: usize, more: bool) -> fmt::Result {
    let comma = if more { "," } else { "" };
    writeln!(f, "{:indent$}}}{comma}", "")
}

fn entry(
    f: &mut fmt::Formatter<'_>,
    indent: usize,
    key: &str,
    value: &dyn fmt::Display,
) -> fmt::Result {
    writeln!(f, "{:indent$}{key}: {value},", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use zc_core::ZoneId;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap()
    }

    #[test]
    fn renders_nested_and_empty_arrays() {
        let payload = vec![
            RateAreaCharges {
                rate_area_id: ZoneId::new(4),
                base_charge_value: "320.00".into(),
                extra_charges: vec![ExtraChargePayload {
                    charge_value: "+50.00".into(),
                    min_weight: "1.000".into(),
                    max_weight: "3.000".into(),
                }],
            },
            RateAreaCharges {
                rate_area_id: ZoneId::new(7),
                base_charge_value: "10.00".into(),
                extra_charges: vec![],
            },
        ];

        let expected = "\
Report generated: 07.03.2024 09:05:01
{
  rate_area_id: 4,
  base_charge_value: 320.00,
  extra_charges: [
    {
      charge_value: +50.00,
      min_weight: 1.000,
      max_weight: 3.000,
    }
  ],
},
{
  rate_area_id: 7,
  base_charge_value: 10.00,
  extra_charges: [],
}
";
        assert_eq!(render_report(&payload, stamp(), "ru-RU"), expected);
    }

    #[test]
    fn empty_payload_is_title_only() {
        assert_eq!(
            render_report(&[], stamp(), "ru-RU"),
            "Report generated: 07.03.2024 09:05:01\n"
        );
    }

    #[test]
    fn title_follows_locale() {
        assert_eq!(
            render_report(&[], stamp(), "en-US"),
            "Report generated: 03/07/2024 09:05:01 AM\n"
        );
        assert_eq!(
            render_report(&[], stamp(), "fr-FR"),
            "Report generated: 2024-03-07 09:05:01\n"
        );
        assert_eq!(date_format("ru_RU"), "%d.%m.%Y %H:%M:%S");
    }
}
