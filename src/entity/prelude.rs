//! 预导入模块，方便使用

pub use super::can_tutor::{
    ActiveModel as CanTutorActiveModel, Entity as CanTutor, Model as CanTutorModel,
};
pub use super::configuration::{
    ActiveModel as ConfigurationActiveModel, Entity as Configuration, Model as ConfigurationModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::messages::{
    ActiveModel as MessageActiveModel, Entity as Messages, Model as MessageModel,
};
pub use super::problem_types::{
    ActiveModel as ProblemTypeActiveModel, Entity as ProblemTypes, Model as ProblemTypeModel,
};
pub use super::professors::{
    ActiveModel as ProfessorActiveModel, Entity as Professors, Model as ProfessorModel,
};
pub use super::sections::{
    ActiveModel as SectionActiveModel, Entity as Sections, Model as SectionModel,
};
pub use super::semesters::{
    ActiveModel as SemesterActiveModel, Entity as Semesters, Model as SemesterModel,
};
pub use super::tickets::{ActiveModel as TicketActiveModel, Entity as Tickets, Model as TicketModel};
pub use super::tutors::{ActiveModel as TutorActiveModel, Entity as Tutors, Model as TutorModel};
