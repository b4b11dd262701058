#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use bank::{load_bank, parse_bank};
pub use error::{BankError, SessionError};

pub use sessions::{
    OptionTag, QuestionView, QuestionViewMode, QuizSession, SessionLoopService, SessionProgress,
    SessionView, SetPickerView, TaggedOption, partition_bank, tag_for,
};
