//! 答题进度、得分与成绩等级的计算

use crate::models::taking::GradeBand;

/// 已答题目占比，四舍五入为整数百分比；没有题目时为 0
pub fn progress_percent(answered: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let answered = answered.min(total);
    (answered as f64 / total as f64 * 100.0).round() as u32
}

/// 10 分制得分，保留两位小数；没有题目时为 0
pub fn quiz_score(correct: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(correct.min(total) as f64 / total as f64 * 10.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn grade_band(score: f64) -> GradeBand {
    if score >= 8.0 {
        GradeBand::Excellent
    } else if score >= 6.0 {
        GradeBand::Good
    } else if score >= 4.0 {
        GradeBand::Satisfactory
    } else {
        GradeBand::Unsatisfactory
    }
}

/// 平均分，保留两位小数；没有分数时为 None
pub fn mean_score(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(round2(scores.iter().sum::<f64>() / scores.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_four_of_five() {
        assert_eq!(progress_percent(4, 5), 80);
    }

    #[test]
    fn test_progress_rounding_and_bounds() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(7, 5), 100);
    }

    #[test]
    fn test_quiz_score() {
        assert_eq!(quiz_score(3, 4), 7.5);
        assert_eq!(quiz_score(1, 3), 3.33);
        assert_eq!(quiz_score(2, 3), 6.67);
        assert_eq!(quiz_score(5, 5), 10.0);
        assert_eq!(quiz_score(0, 0), 0.0);
    }

    #[test]
    fn test_grade_band_boundaries() {
        assert_eq!(grade_band(8.0), GradeBand::Excellent);
        assert_eq!(grade_band(10.0), GradeBand::Excellent);
        assert_eq!(grade_band(6.0), GradeBand::Good);
        assert_eq!(grade_band(7.99), GradeBand::Good);
        assert_eq!(grade_band(4.0), GradeBand::Satisfactory);
        assert_eq!(grade_band(3.99), GradeBand::Unsatisfactory);
        assert_eq!(grade_band(0.0), GradeBand::Unsatisfactory);
    }

    #[test]
    fn test_mean_score() {
        assert_eq!(mean_score(&[]), None);
        assert_eq!(mean_score(&[7.5, 10.0]), Some(8.75));
        assert_eq!(mean_score(&[1.0, 2.0, 2.0]), Some(1.67));
    }
}
