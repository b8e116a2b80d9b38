pub mod diary;
pub mod diary_input;
pub mod user;

pub use diary::DiaryEntry;
pub use diary_input::{CreateDiaryInput, DiaryFields, DiaryMutationResponse, UpdateDiaryInput};
pub use user::User;
