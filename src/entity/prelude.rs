//! 预导入模块，方便使用

pub use super::answers::{ActiveModel as AnswerActiveModel, Entity as Answers, Model as AnswerModel};
pub use super::messages::{
    ActiveModel as MessageActiveModel, Entity as Messages, Model as MessageModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::quizzes::{ActiveModel as QuizActiveModel, Entity as Quizzes, Model as QuizModel};
pub use super::rooms::{ActiveModel as RoomActiveModel, Entity as Rooms, Model as RoomModel};
pub use super::student_answers::{
    ActiveModel as StudentAnswerActiveModel, Entity as StudentAnswers,
    Model as StudentAnswerModel,
};
pub use super::student_interests::{
    ActiveModel as StudentInterestActiveModel, Entity as StudentInterests,
    Model as StudentInterestModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::taken_quizzes::{
    ActiveModel as TakenQuizActiveModel, Entity as TakenQuizzes, Model as TakenQuizModel,
};
pub use super::team_members::{
    ActiveModel as TeamMemberActiveModel, Entity as TeamMembers, Model as TeamMemberModel,
};
pub use super::teams::{ActiveModel as TeamActiveModel, Entity as Teams, Model as TeamModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
