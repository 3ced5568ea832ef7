//! 基于内存 SQLite 与真实迁移的存储层测试

use classroom_quiz::errors::ClassroomError;
use classroom_quiz::models::questions::AnswerChanges;
use classroom_quiz::models::quizzes::requests::CreateQuizRequest;
use classroom_quiz::models::taking::SubmitOutcome;
use classroom_quiz::models::users::{User, UserRole, requests::NewUser};
use classroom_quiz::services::students::progress::progress_percent;
use classroom_quiz::storage::{SeaOrmStorage, Storage};

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::new_in_memory()
        .await
        .expect("in-memory storage")
}

fn user_request(username: &str, role: UserRole) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "hash".to_string(),
        role,
        display_name: None,
    }
}

async fn teacher(storage: &SeaOrmStorage) -> User {
    storage
        .create_user(user_request("teacher", UserRole::Teacher))
        .await
        .unwrap()
}

async fn student(storage: &SeaOrmStorage, name: &str, interests: &[i64]) -> User {
    storage
        .create_student(user_request(name, UserRole::Student), interests)
        .await
        .unwrap()
}

/// 创建测验，每题两个选项，第一个正确
async fn quiz_with_questions(
    storage: &SeaOrmStorage,
    owner: i64,
    subject_id: i64,
    name: &str,
    questions: usize,
) -> i64 {
    let quiz = storage
        .create_quiz(
            owner,
            CreateQuizRequest {
                name: name.to_string(),
                subject_id,
                room_id: None,
            },
        )
        .await
        .unwrap();

    for i in 0..questions {
        let question = storage
            .create_question(quiz.id, &format!("Question {i}"))
            .await
            .unwrap();
        storage
            .save_question_formset(
                question.id,
                &question.text,
                AnswerChanges {
                    creates: vec![("a right".to_string(), true), ("b wrong".to_string(), false)],
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
    quiz.id
}

async fn answer_by_text(storage: &SeaOrmStorage, student_id: i64, quiz_id: i64, text: &str) -> i64 {
    let state = storage.get_take_progress(student_id, quiz_id).await.unwrap();
    state
        .answers
        .iter()
        .find(|a| a.text == text)
        .map(|a| a.id)
        .unwrap()
}

#[tokio::test]
async fn test_available_quizzes_filtering() {
    let storage = storage().await;
    let teacher = teacher(&storage).await;
    let math = storage.create_subject("Math", "#007bff").await.unwrap();
    let art = storage.create_subject("Art", "#28a745").await.unwrap();
    let student = student(&storage, "ann", &[math.id]).await;

    let algebra = quiz_with_questions(&storage, teacher.id, math.id, "Algebra", 1).await;
    quiz_with_questions(&storage, teacher.id, math.id, "Empty", 0).await;
    quiz_with_questions(&storage, teacher.id, art.id, "Colors", 2).await;
    let geometry = quiz_with_questions(&storage, teacher.id, math.id, "Geometry", 1).await;

    let names: Vec<String> = storage
        .list_available_quizzes(student.id)
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.name)
        .collect();
    assert_eq!(names, vec!["Algebra", "Geometry"]);

    let answer = answer_by_text(&storage, student.id, geometry, "b wrong").await;
    let outcome = storage
        .submit_answer(student.id, geometry, answer)
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Completed(_)));

    let available = storage.list_available_quizzes(student.id).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, algebra);
    assert_eq!(available[0].questions_count, 1);
}

#[tokio::test]
async fn test_progress_and_completion_with_team() {
    let storage = storage().await;
    let teacher = teacher(&storage).await;
    let math = storage.create_subject("Math", "#007bff").await.unwrap();
    let ann = student(&storage, "ann", &[math.id]).await;
    let bob = student(&storage, "bob", &[math.id]).await;
    let quiz_id = quiz_with_questions(&storage, teacher.id, math.id, "Fractions", 5).await;
    let team = storage
        .create_team("Owls", quiz_id, &[ann.id, bob.id])
        .await
        .unwrap();

    // 四题答对
    for _ in 0..4 {
        let answer = answer_by_text(&storage, ann.id, quiz_id, "a right").await;
        let outcome = storage.submit_answer(ann.id, quiz_id, answer).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::InProgress { .. }));
    }

    let state = storage.get_take_progress(ann.id, quiz_id).await.unwrap();
    assert_eq!((state.answered, state.total), (4, 5));
    assert_eq!(progress_percent(state.answered, state.total), 80);
    assert_eq!(state.question.unwrap().text, "Question 4");

    let answer = answer_by_text(&storage, ann.id, quiz_id, "b wrong").await;
    let SubmitOutcome::Completed(taken) =
        storage.submit_answer(ann.id, quiz_id, answer).await.unwrap()
    else {
        panic!("quiz should be completed");
    };
    assert_eq!(taken.team_id, Some(team.id));
    assert_eq!(taken.score, 8.0);

    let results = storage.list_quiz_results(quiz_id).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].team_name.as_deref(), Some("Owls"));

    // 完成后不能再作答
    let err = storage
        .submit_answer(ann.id, quiz_id, answer)
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Conflict(_)));
    assert_eq!(storage.list_quiz_results(quiz_id).await.unwrap().len(), 1);

    let report = storage
        .get_student_result_report(ann.id, quiz_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.team_name.as_deref(), Some("Owls"));
    // bob 还没有完成测验，不计入小组名单
    assert_eq!(report.team_members, vec!["ann"]);
    assert_eq!(report.rows.len(), 5);
    assert!(!report.rows[4].is_correct);

    assert!(
        storage
            .get_student_result_report(bob.id, quiz_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_answer_must_belong_to_current_question() {
    let storage = storage().await;
    let teacher = teacher(&storage).await;
    let math = storage.create_subject("Math", "#007bff").await.unwrap();
    let ann = student(&storage, "ann", &[math.id]).await;
    let quiz_id = quiz_with_questions(&storage, teacher.id, math.id, "Fractions", 2).await;

    let questions = storage.list_question_summaries(quiz_id).await.unwrap();
    let second_answers = storage.list_answers(questions[1].id).await.unwrap();

    let err = storage
        .submit_answer(ann.id, quiz_id, second_answers[0].id)
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Validation(_)));

    let state = storage.get_take_progress(ann.id, quiz_id).await.unwrap();
    assert_eq!(state.answered, 0);
}

#[tokio::test]
async fn test_student_joins_one_team_per_quiz() {
    let storage = storage().await;
    let teacher = teacher(&storage).await;
    let math = storage.create_subject("Math", "#007bff").await.unwrap();
    let ann = student(&storage, "ann", &[math.id]).await;
    let bob = student(&storage, "bob", &[math.id]).await;
    let cid = student(&storage, "cid", &[math.id]).await;
    let quiz_id = quiz_with_questions(&storage, teacher.id, math.id, "Fractions", 1).await;
    let other_quiz = quiz_with_questions(&storage, teacher.id, math.id, "Decimals", 1).await;

    let owls = storage
        .create_team("Owls", quiz_id, &[ann.id, bob.id])
        .await
        .unwrap();

    let err = storage
        .create_team("Bees", quiz_id, &[cid.id, ann.id])
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Validation(_)));

    // 被拒绝的小组整体回滚
    let teams = storage.list_teams(None).await.unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].team.id, owls.id);

    storage.create_team("Bees", quiz_id, &[cid.id]).await.unwrap();
    storage
        .create_team("Owls again", other_quiz, &[ann.id])
        .await
        .unwrap();

    for student in [&ann, &bob] {
        let answer = answer_by_text(&storage, student.id, quiz_id, "a right").await;
        let SubmitOutcome::Completed(taken) =
            storage.submit_answer(student.id, quiz_id, answer).await.unwrap()
        else {
            panic!("single question quiz should complete");
        };
        assert_eq!(taken.team_id, Some(owls.id));
    }

    let report = storage
        .get_student_result_report(ann.id, quiz_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.team_members, vec!["ann", "bob"]);
}

#[tokio::test]
async fn test_submit_to_quiz_without_questions_is_not_found() {
    let storage = storage().await;
    let teacher = teacher(&storage).await;
    let math = storage.create_subject("Math", "#007bff").await.unwrap();
    let ann = student(&storage, "ann", &[math.id]).await;
    let empty = quiz_with_questions(&storage, teacher.id, math.id, "Empty", 0).await;
    let quiz_id = quiz_with_questions(&storage, teacher.id, math.id, "Fractions", 1).await;
    let answer = answer_by_text(&storage, ann.id, quiz_id, "a right").await;

    let err = storage.submit_answer(ann.id, empty, answer).await.unwrap_err();
    assert!(matches!(err, ClassroomError::NotFound(_)));
}

#[tokio::test]
async fn test_question_formset_applies_changes() {
    let storage = storage().await;
    let teacher = teacher(&storage).await;
    let math = storage.create_subject("Math", "#007bff").await.unwrap();
    let quiz_id = quiz_with_questions(&storage, teacher.id, math.id, "Fractions", 1).await;
    let question_id = storage.list_question_summaries(quiz_id).await.unwrap()[0].id;
    let answers = storage.list_answers(question_id).await.unwrap();
    let right = answers.iter().find(|a| a.is_correct).unwrap();
    let wrong = answers.iter().find(|a| !a.is_correct).unwrap();

    let (question, answers) = storage
        .save_question_formset(
            question_id,
            "What is 1/2 + 1/4?",
            AnswerChanges {
                updates: vec![(right.id, "3/4".to_string(), true)],
                creates: vec![("2/6".to_string(), false)],
                deletes: vec![wrong.id],
            },
        )
        .await
        .unwrap();

    assert_eq!(question.text, "What is 1/2 + 1/4?");
    let texts: Vec<&str> = answers.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts.len(), 2);
    assert!(texts.contains(&"3/4"));
    assert!(texts.contains(&"2/6"));

    let summary = storage.list_question_summaries(quiz_id).await.unwrap();
    assert_eq!(summary[0].answers_count, 2);
}

#[tokio::test]
async fn test_student_signup_and_interests() {
    let storage = storage().await;
    let math = storage.create_subject("Math", "#007bff").await.unwrap();
    let art = storage.create_subject("Art", "#28a745").await.unwrap();
    assert_eq!(storage.count_subjects_in(&[math.id, art.id, 999]).await.unwrap(), 2);

    let ann = student(&storage, "ann", &[math.id]).await;
    let interests = storage.list_student_interests(ann.id).await.unwrap();
    assert_eq!(interests.len(), 1);

    let interests = storage
        .set_student_interests(ann.id, &[art.id, math.id])
        .await
        .unwrap();
    let names: Vec<&str> = interests.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Art", "Math"]);
}

#[tokio::test]
async fn test_room_messages_paginated_in_order() {
    let storage = storage().await;
    let ann = storage
        .create_user(user_request("ann", UserRole::Student))
        .await
        .unwrap();
    let room = storage.create_room("General").await.unwrap();

    for i in 0..3 {
        storage
            .create_message(room.id, ann.id, &format!("msg {i}"))
            .await
            .unwrap();
    }

    let page = storage
        .list_messages_page(
            room.id,
            classroom_quiz::models::PaginationQuery { page: 2, size: 2 },
        )
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].message.content, "msg 2");
    assert_eq!(page.items[0].username, "ann");
}
