//! 选项表单校验
//!
//! 写库之前先在内存中应用全部变更，确认结果满足数量与正确答案约束。

use std::collections::{HashMap, HashSet};

use crate::models::questions::{Answer, AnswerChanges, requests::AnswerFormEntry};

pub const NO_CORRECT_ANSWER: &str = "Mark at least one answer as correct.";

/// 选项数量限制
#[derive(Debug, Clone, Copy)]
pub struct FormsetLimits {
    pub min_answers: usize,
    pub max_answers: usize,
}

/// 校验选项表单并生成变更集
///
/// 带 id 的条目更新或删除该题已有的选项，不带 id 的条目新建选项；
/// 表单中没有出现的已有选项保持不变。
pub fn build_answer_changes(
    existing: &[Answer],
    entries: &[AnswerFormEntry],
    limits: FormsetLimits,
) -> Result<AnswerChanges, String> {
    let existing_by_id: HashMap<i64, &Answer> = existing.iter().map(|a| (a.id, a)).collect();
    let mut seen = HashSet::new();
    let mut changes = AnswerChanges::default();

    for entry in entries {
        match entry.id {
            Some(id) => {
                if !existing_by_id.contains_key(&id) {
                    return Err(format!("Answer {id} does not belong to this question."));
                }
                if !seen.insert(id) {
                    return Err(format!("Answer {id} appears more than once."));
                }
                if entry.delete {
                    changes.deletes.push(id);
                } else {
                    let text = answer_text(&entry.text)?;
                    changes.updates.push((id, text, entry.is_correct));
                }
            }
            // 新条目勾选删除等于没有提交
            None if entry.delete => {}
            None => {
                let text = answer_text(&entry.text)?;
                changes.creates.push((text, entry.is_correct));
            }
        }
    }

    // 应用变更后的选项状态：未提及的已有选项 + 更新 + 新建
    let untouched = existing.iter().filter(|a| !seen.contains(&a.id));
    let remaining = untouched.clone().count() + changes.updates.len() + changes.creates.len();

    if remaining < limits.min_answers {
        return Err(format!(
            "Please submit at least {} answers.",
            limits.min_answers
        ));
    }
    if remaining > limits.max_answers {
        return Err(format!(
            "Please submit at most {} answers.",
            limits.max_answers
        ));
    }

    let has_correct = untouched.clone().any(|a| a.is_correct)
        || changes.updates.iter().any(|(_, _, correct)| *correct)
        || changes.creates.iter().any(|(_, correct)| *correct);
    if !has_correct {
        return Err(NO_CORRECT_ANSWER.to_string());
    }

    Ok(changes)
}

fn answer_text(text: &str) -> Result<String, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("Answer text is required.".to_string());
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: FormsetLimits = FormsetLimits {
        min_answers: 2,
        max_answers: 10,
    };

    fn answer(id: i64, text: &str, is_correct: bool) -> Answer {
        Answer {
            id,
            question_id: 1,
            text: text.to_string(),
            is_correct,
        }
    }

    fn new_entry(text: &str, is_correct: bool) -> AnswerFormEntry {
        AnswerFormEntry {
            id: None,
            text: text.to_string(),
            is_correct,
            delete: false,
        }
    }

    fn existing_entry(id: i64, text: &str, is_correct: bool, delete: bool) -> AnswerFormEntry {
        AnswerFormEntry {
            id: Some(id),
            text: text.to_string(),
            is_correct,
            delete,
        }
    }

    #[test]
    fn test_new_answers_are_created() {
        let entries = vec![new_entry("4", true), new_entry(" 5 ", false)];
        let changes = build_answer_changes(&[], &entries, LIMITS).unwrap();
        assert_eq!(
            changes.creates,
            vec![("4".to_string(), true), ("5".to_string(), false)]
        );
        assert!(changes.updates.is_empty());
        assert!(changes.deletes.is_empty());
    }

    #[test]
    fn test_no_correct_answer_is_rejected() {
        let entries = vec![new_entry("a", false), new_entry("b", false)];
        let err = build_answer_changes(&[], &entries, LIMITS).unwrap_err();
        assert_eq!(err, NO_CORRECT_ANSWER);
    }

    #[test]
    fn test_deleting_the_only_correct_answer_is_rejected() {
        let existing = vec![answer(1, "a", true), answer(2, "b", false), answer(3, "c", false)];
        let entries = vec![existing_entry(1, "a", true, true)];
        let err = build_answer_changes(&existing, &entries, LIMITS).unwrap_err();
        assert_eq!(err, NO_CORRECT_ANSWER);
    }

    #[test]
    fn test_too_few_remaining_answers() {
        let existing = vec![answer(1, "a", true), answer(2, "b", false)];
        let entries = vec![existing_entry(2, "b", false, true)];
        assert!(build_answer_changes(&existing, &entries, LIMITS).is_err());
    }

    #[test]
    fn test_too_many_answers() {
        let entries: Vec<_> = (0..11).map(|i| new_entry(&i.to_string(), i == 0)).collect();
        let err = build_answer_changes(&[], &entries, LIMITS).unwrap_err();
        assert_eq!(err, "Please submit at most 10 answers.");

        let entries: Vec<_> = (0..10).map(|i| new_entry(&i.to_string(), i == 0)).collect();
        assert!(build_answer_changes(&[], &entries, LIMITS).is_ok());
    }

    #[test]
    fn test_untouched_answers_count_and_keep_correctness() {
        let existing = vec![answer(1, "a", true), answer(2, "b", false)];
        let entries = vec![existing_entry(2, "B", false, false), new_entry("c", false)];
        let changes = build_answer_changes(&existing, &entries, LIMITS).unwrap();
        assert_eq!(changes.updates, vec![(2, "B".to_string(), false)]);
        assert_eq!(changes.creates, vec![("c".to_string(), false)]);
    }

    #[test]
    fn test_foreign_and_duplicate_ids_are_rejected() {
        let existing = vec![answer(1, "a", true), answer(2, "b", false)];
        let foreign = vec![existing_entry(99, "x", true, false)];
        assert!(build_answer_changes(&existing, &foreign, LIMITS).is_err());

        let duplicate = vec![
            existing_entry(1, "a", true, false),
            existing_entry(1, "a", true, true),
        ];
        assert!(build_answer_changes(&existing, &duplicate, LIMITS).is_err());
    }

    #[test]
    fn test_blank_text_is_rejected_and_deleted_new_entries_ignored() {
        let entries = vec![new_entry("a", true), new_entry("   ", false)];
        assert!(build_answer_changes(&[], &entries, LIMITS).is_err());

        let mut ignored = new_entry("", false);
        ignored.delete = true;
        let entries = vec![new_entry("a", true), new_entry("b", false), ignored];
        let changes = build_answer_changes(&[], &entries, LIMITS).unwrap();
        assert_eq!(changes.creates.len(), 2);
    }
}
