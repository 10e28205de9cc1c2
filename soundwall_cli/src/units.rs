//! Imperial/metric conversion helpers for the command line layer.
//!
//! Only meters and radians cross into the core library; every foot, inch and
//! degree lives here.

/// Converts feet to meters.
pub fn ft_to_m(feet: f64) -> f64 {
    feet * 0.3048
}

/// Converts meters to feet.
pub fn m_to_ft(meters: f64) -> f64 {
    meters / 0.3048
}

/// Formats a station value as a string: `XX+YY.YY` in feet when imperial,
/// `X+YYY.YYY` per kilometer otherwise.
pub fn format_station(station_m: f64, imperial: bool) -> String {
    if imperial {
        let sta_ft = m_to_ft(station_m);
        let hundreds = (sta_ft / 100.0).floor() as i64;
        let remainder = sta_ft - hundreds as f64 * 100.0;
        format!("{}+{:05.2}", hundreds, remainder)
    } else {
        let thousands = (station_m / 1000.0).floor() as i64;
        let remainder = station_m - thousands as f64 * 1000.0;
        format!("{}+{:07.3}", thousands, remainder)
    }
}

/// Parses a station string like `10+50.00` back to meters.
pub fn parse_station(text: &str, imperial: bool) -> Option<f64> {
    let value = match text.split_once('+') {
        Some((head, tail)) => {
            let hundreds: f64 = head.trim().parse().ok()?;
            let remainder: f64 = tail.trim().parse().ok()?;
            hundreds * 100.0 + remainder
        }
        None => text.trim().parse().ok()?,
    };
    Some(if imperial { ft_to_m(value) } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feet_round_trip() {
        assert!((ft_to_m(10.0) - 3.048).abs() < 1e-12);
        assert!((m_to_ft(3.048) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn station_formats_imperial() {
        // 320.04 m = 1050 ft.
        assert_eq!(format_station(320.04, true), "10+50.00");
        assert_eq!(format_station(0.0, true), "0+00.00");
    }

    #[test]
    fn station_formats_metric() {
        assert_eq!(format_station(1234.5, false), "1+234.500");
    }

    #[test]
    fn station_parse_round_trip() {
        let m = parse_station("10+50.00", true).unwrap();
        assert!((m - 320.04).abs() < 1e-9);
        assert!((parse_station("320.04", false).unwrap() - 320.04).abs() < 1e-12);
        assert!(parse_station("abc", true).is_none());
    }
}
