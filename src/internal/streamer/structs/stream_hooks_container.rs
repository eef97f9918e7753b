use crate::internal::streamer::traits::stream_hook::{HookAbort, StreamHook};

/// 钩子容器：按注册顺序依次执行。
#[derive(Default)]
pub struct StreamHooksContainer {
    hooks: Vec<Box<dyn StreamHook>>,
}

impl StreamHooksContainer {
    pub fn add(&mut self, hook: impl StreamHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub async fn run_before_attempt(&mut self, offset: u64, attempt: u32) -> Result<(), HookAbort> {
        for h in self.hooks.iter_mut() {
            h.before_attempt(offset, attempt).await?;
        }
        Ok(())
    }

    pub fn run_on_chunk(&mut self, chunk: &[u8]) {
        for h in self.hooks.iter_mut() {
            h.on_chunk(chunk);
        }
    }

    pub fn run_on_progress(&mut self, bytes_done: u64, total: Option<u64>) {
        for h in self.hooks.iter_mut() {
            h.on_progress(bytes_done, total);
        }
    }

    pub async fn run_after_complete(&mut self) {
        for h in self.hooks.iter_mut() {
            h.after_complete().await;
        }
    }
}
