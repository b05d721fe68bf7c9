use chrono::{NaiveTime, TimeDelta};

/// Minutes from `start` to `end`, negative when `end` comes first.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Wraps around midnight like a wall clock.
pub fn add_minutes(time: NaiveTime, minutes: u32) -> NaiveTime {
    time + TimeDelta::minutes(i64::from(minutes))
}

/// `part / total` as a rounded percentage, 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rate = (part * 100 + total / 2) / total;
    u32::try_from(rate).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_minutes_should_carry_hours() {
        let t: NaiveTime = "09:45:00".parse().unwrap();
        assert_eq!(add_minutes(t, 30), "10:15:00".parse::<NaiveTime>().unwrap());
        assert_eq!(minutes_between(t, add_minutes(t, 120)), 120);
    }

    #[test]
    fn percentage_should_round_half_up() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(4, 4), 100);
    }
}
