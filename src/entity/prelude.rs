//! 预导入模块，方便使用

pub use super::ai_sources::{
    ActiveModel as AiSourceActiveModel, Entity as AiSources, Model as AiSourceModel,
};
pub use super::attachments::{
    ActiveModel as AttachmentActiveModel, Entity as Attachments, Model as AttachmentModel,
};
pub use super::chats::{ActiveModel as ChatActiveModel, Entity as Chats, Model as ChatModel};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::messages::{
    ActiveModel as MessageActiveModel, Entity as Messages, Model as MessageModel,
};
pub use super::registration_requests::{
    ActiveModel as RegistrationRequestActiveModel, Entity as RegistrationRequests,
    Model as RegistrationRequestModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teacher_subjects::{
    ActiveModel as TeacherSubjectActiveModel, Entity as TeacherSubjects,
    Model as TeacherSubjectModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
