//! 一次性定时器
//!
//! 包装 `gloo_timers::callback::Timeout`。重新 arm 会取消上一个，
//! 保证新的通知不会被旧定时器提前清掉。

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Default)]
pub struct DismissTimer {
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl DismissTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm<F>(&self, after: Duration, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, callback);
        // drop 旧的 Timeout 即取消
        self.pending.replace(Some(timeout));
    }

    pub fn cancel(&self) {
        self.pending.replace(None);
    }
}
