//! Exam clock formatting

/// Format remaining seconds as zero-padded `MM:SS`
///
/// # Examples
/// ```
/// use exam_ivr::util::clock::format_clock;
///
/// assert_eq!(format_clock(65), "01:05");
/// assert_eq!(format_clock(300), "05:00");
/// assert_eq!(format_clock(0), "00:00");
/// ```
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
