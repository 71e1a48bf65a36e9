//! Reply policy: which comments get answered, and with what

use molt_core::{Comment, ContentPool, ReplyDecision};
use rand::Rng;

/// Decides replies for one post's comments
#[derive(Debug, Clone)]
pub struct ReplyPolicy {
    ceiling: usize,
    replies: ContentPool<String>,
}

impl ReplyPolicy {
    /// `ceiling` bounds how many comments per post are considered each cycle
    pub fn new(ceiling: usize, replies: ContentPool<String>) -> Self {
        Self { ceiling, replies }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Decisions for `comments`, in their original order
    ///
    /// Only the first `ceiling` comments are considered; those written by
    /// `own_username` are skipped. Previously answered comments are not
    /// remembered, so the same comment is answered again next cycle.
    pub fn select_replies_for(&self, comments: &[Comment], own_username: &str) -> Vec<ReplyDecision> {
        self.select_replies_with(comments, own_username, &mut rand::thread_rng())
    }

    /// [`Self::select_replies_for`] with a caller-supplied RNG
    pub fn select_replies_with<R: Rng + ?Sized>(
        &self,
        comments: &[Comment],
        own_username: &str,
        rng: &mut R,
    ) -> Vec<ReplyDecision> {
        comments
            .iter()
            .take(self.ceiling)
            .filter(|comment| !comment.is_authored_by(own_username))
            .map(|comment| ReplyDecision {
                target_comment_id: comment.id.clone(),
                chosen_reply_text: self.replies.pick_with(rng).clone(),
            })
            .collect()
    }
}
