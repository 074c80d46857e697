//! Built-in reminders served without any network access

use crate::types::{Reminder, ReminderType};
use chrono::{DateTime, NaiveDate, Utc};

const BUILT_IN: [(&str, &str, &str, ReminderType); 3] = [
    (
        "خَيْرُكُمْ أَحْسَنُكُمْ خُلُقًا",
        "The Prophet ﷺ said: 'The best among you are those who have the best manners and character.'",
        "Sahih al-Bukhari 3559",
        ReminderType::Hadith,
    ),
    (
        "فَإِنَّ مَعَ الْعُسْرِ يُسْرًا",
        "Verily, with hardship comes ease.",
        "Quran 94:5",
        ReminderType::Quran,
    ),
    (
        "لَا يُؤْمِنُ أَحَدُكُمْ حَتَّى يُحِبَّ لِأَخِيهِ مَا يُحِبُّ لِنَفْسِهِ",
        "The Prophet ﷺ said: 'None of you truly believes until he loves for his brother what he loves for himself.'",
        "Sahih al-Bukhari 13",
        ReminderType::Hadith,
    ),
];

/// All built-in reminders, in rotation order
pub fn built_in() -> Vec<Reminder> {
    BUILT_IN
        .iter()
        .map(|(arabic, english, source, kind)| Reminder::new(*arabic, *english, *source, *kind))
        .collect()
}

/// Reminder for a date, rotating by days since the Unix epoch
pub fn reminder_for_date(date: NaiveDate) -> Reminder {
    let days = (date - DateTime::<Utc>::UNIX_EPOCH.date_naive()).num_days();
    let (arabic, english, source, kind) = BUILT_IN[days.rem_euclid(BUILT_IN.len() as i64) as usize];
    Reminder::new(arabic, english, source, kind)
}

pub fn reminder_for_today() -> Reminder {
    reminder_for_date(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rotation_by_epoch_day() {
        // 2024-01-01 is epoch day 19723
        assert_eq!(reminder_for_date(ymd(2024, 1, 1)).source, "Quran 94:5");
        assert_eq!(reminder_for_date(ymd(2024, 1, 2)).source, "Sahih al-Bukhari 13");
        assert_eq!(reminder_for_date(ymd(2024, 1, 3)).source, "Sahih al-Bukhari 3559");
        assert_eq!(reminder_for_date(ymd(1970, 1, 1)).source, "Sahih al-Bukhari 3559");
    }

    #[test]
    fn test_dates_before_epoch_still_rotate() {
        let reminder = reminder_for_date(ymd(1969, 12, 31));
        assert_eq!(reminder.source, "Sahih al-Bukhari 13");
    }

    #[test]
    fn test_same_day_same_reminder() {
        let a = reminder_for_date(ymd(2025, 6, 1));
        let b = reminder_for_date(ymd(2025, 6, 1));
        assert_eq!(a, b);
        assert_eq!(built_in().len(), 3);
    }
}
