pub mod auth;

pub mod subjects;

pub mod quizzes;

pub mod teams;

pub mod students;

pub mod rooms;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use frontend::configure_frontend_routes;
pub use quizzes::configure_quiz_routes;
pub use rooms::configure_room_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use teams::configure_team_routes;
