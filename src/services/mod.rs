pub mod assignments;
pub mod homeworks;
pub mod lessons;
pub mod notifications;

pub use assignments::AssignmentService;
pub use homeworks::HomeworkService;
pub use lessons::LessonService;
pub use notifications::Notifier;
