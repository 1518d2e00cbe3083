mod envelope;
pub use self::envelope::{ApiResponse, ApiStatus};

mod user;
pub use self::user::User;

mod submission;
pub use self::submission::{
    ParticipantType, Party, PartyMember, Problem, ProblemId, Submission, Verdict,
};

mod rating;
pub use self::rating::RatingChange;

mod contest;
pub use self::contest::{Contest, ContestPhase, ProblemResult, RanklistRow, Standings};
