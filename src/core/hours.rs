use chrono::NaiveTime;

const TIME_FORMATS: [&str; 2] = ["%I:%M %p", "%H:%M"];

/// Daily opening window parsed from strings like `11:00 AM - 10:00 PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningHours {
    AllDay,
    Window { opens: NaiveTime, closes: NaiveTime },
}

impl OpeningHours {
    /// Returns `None` for text that does not describe a single daily window.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let lowered = text.to_lowercase();
        if lowered.contains("24 hours") || lowered == "24/7" {
            return Some(OpeningHours::AllDay);
        }

        let (opens, closes) = text
            .split_once(" - ")
            .or_else(|| text.split_once('–'))
            .or_else(|| text.split_once('-'))?;

        Some(OpeningHours::Window {
            opens: parse_time(opens)?,
            closes: parse_time(closes)?,
        })
    }

    /// Closing time is exclusive. A window whose closing time is earlier than
    /// its opening time runs past midnight.
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        match *self {
            OpeningHours::AllDay => true,
            OpeningHours::Window { opens, closes } if opens <= closes => {
                opens <= time && time < closes
            }
            OpeningHours::Window { opens, closes } => time >= opens || time < closes,
        }
    }
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim().to_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&text, format).ok())
}

/// Unparseable hours count as closed.
pub fn is_open_at(open_hours: &str, time: NaiveTime) -> bool {
    OpeningHours::parse(open_hours)
        .map(|hours| hours.is_open_at(time))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_twelve_hour_window() {
        let hours = OpeningHours::parse("11:00 AM - 10:00 PM").unwrap();
        assert_eq!(
            hours,
            OpeningHours::Window {
                opens: at(11, 0),
                closes: at(22, 0)
            }
        );
        assert!(hours.is_open_at(at(11, 0)));
        assert!(hours.is_open_at(at(21, 59)));
        assert!(!hours.is_open_at(at(22, 0)));
        assert!(!hours.is_open_at(at(9, 30)));
    }

    #[test]
    fn test_window_past_midnight() {
        let hours = OpeningHours::parse("8:00 PM - 2:00 AM").unwrap();
        assert!(hours.is_open_at(at(23, 0)));
        assert!(hours.is_open_at(at(1, 30)));
        assert!(!hours.is_open_at(at(12, 0)));
    }

    #[test]
    fn test_all_day_and_garbage() {
        assert!(is_open_at("Open 24 hours", at(3, 0)));
        assert!(!is_open_at("By appointment", at(12, 0)));
        assert!(!is_open_at("", at(12, 0)));
    }

    #[test]
    fn test_twenty_four_hour_clock() {
        assert!(is_open_at("09:00-17:30", at(17, 0)));
        assert!(!is_open_at("09:00-17:30", at(17, 30)));
    }
}
