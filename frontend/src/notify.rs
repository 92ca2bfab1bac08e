//! Transient success and error notices.

use std::rc::Rc;

use yew::Reducible;

/// At most this many notices are on screen; older ones make room.
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

pub enum NoticeAction {
    Push(NoticeKind, String),
    Dismiss(u32),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
    next_id: u32,
}

impl NoticeQueue {
    /// Oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl Reducible for NoticeQueue {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NoticeAction::Push(kind, message) => {
                next.notices.push(Notice {
                    id: next.next_id,
                    kind,
                    message,
                });
                next.next_id = next.next_id.wrapping_add(1);
                let overflow = next.notices.len().saturating_sub(MAX_VISIBLE);
                next.notices.drain(..overflow);
            }
            NoticeAction::Dismiss(id) => {
                if !self.notices.iter().any(|notice| notice.id == id) {
                    return self;
                }
                next.notices.retain(|notice| notice.id != id);
            }
            NoticeAction::Clear => next.notices.clear(),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(queue: Rc<NoticeQueue>, kind: NoticeKind, message: &str) -> Rc<NoticeQueue> {
        queue.reduce(NoticeAction::Push(kind, message.to_string()))
    }

    #[test]
    fn oldest_notices_make_room() {
        let mut queue = Rc::new(NoticeQueue::default());
        for message in ["one", "two", "three", "four"] {
            queue = push(queue, NoticeKind::Success, message);
        }

        let messages: Vec<&str> = queue.notices().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three", "four"]);
    }

    #[test]
    fn dismiss_removes_only_that_notice() {
        let queue = push(Rc::new(NoticeQueue::default()), NoticeKind::Error, "Insufficient funds");
        let queue = push(queue, NoticeKind::Success, "Transfer completed");
        let first = queue.notices()[0].id;

        let queue = queue.reduce(NoticeAction::Dismiss(first));
        assert_eq!(queue.notices().len(), 1);
        assert_eq!(queue.notices()[0].kind, NoticeKind::Success);
    }

    #[test]
    fn dismissing_an_expired_notice_keeps_the_queue() {
        let queue = push(Rc::new(NoticeQueue::default()), NoticeKind::Error, "x");
        let same = queue.clone().reduce(NoticeAction::Dismiss(42));
        assert!(Rc::ptr_eq(&queue, &same));

        let cleared = same.reduce(NoticeAction::Clear);
        assert!(cleared.notices().is_empty());
    }
}
