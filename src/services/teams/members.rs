//! 小组成员列表校验

use std::collections::HashSet;

/// 成员至少一人、不能重复、不超过上限
pub fn validate_team_members(student_ids: &[i64], max_team_size: usize) -> Result<(), String> {
    if student_ids.is_empty() {
        return Err("Select at least one student.".to_string());
    }

    let mut seen = HashSet::new();
    if let Some(dup) = student_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(format!("Student {dup} is listed more than once."));
    }

    if student_ids.len() > max_team_size {
        return Err(format!(
            "A team may have at most {max_team_size} students."
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_students_allowed() {
        assert!(validate_team_members(&[1, 2, 3, 4, 5], 5).is_ok());
        assert!(validate_team_members(&[9], 5).is_ok());
    }

    #[test]
    fn test_six_students_rejected() {
        let err = validate_team_members(&[1, 2, 3, 4, 5, 6], 5).unwrap_err();
        assert_eq!(err, "A team may have at most 5 students.");
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = validate_team_members(&[1, 2, 1], 5).unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(validate_team_members(&[], 5).is_err());
    }
}
