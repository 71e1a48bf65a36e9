//! # molt-engage
//!
//! The posting and engagement cycle for Moltbot.
//!
//! One cycle publishes a post, then walks the agent's own posts, fetches
//! their comments and answers the ones written by other agents:
//!
//! 1. [`EngagementCycle::publish_new_post`] picks a body and publishes it
//! 2. [`resolve_own_posts`] finds the agent's posts
//! 3. [`fetch_comments`] lists comments per post
//! 4. [`ReplyPolicy`] decides which comments to answer and with what
//! 5. [`publish_reply`] sends each reply
//!
//! Every provider failure is absorbed and logged; a cycle never returns an
//! error. [`Driver`] repeats cycles on an interval until shut down.

mod activity_logger;
mod budget;
mod comments;
mod cycle;
mod driver;
mod own_posts;
mod policy;
mod publisher;
mod report;

pub use activity_logger::ActivityLogger;
pub use budget::DailyPostBudget;
pub use comments::{fetch_comments, CommentRoute};
pub use cycle::EngagementCycle;
pub use driver::Driver;
pub use own_posts::{resolve_own_posts, resolve_own_posts_detailed, OwnPosts, PostListingRoute};
pub use policy::ReplyPolicy;
pub use publisher::{publish_reply, ReplyRoute};
pub use report::CycleReport;
