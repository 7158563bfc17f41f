//! Hands items produced on other threads over to a single consumer, in timestamp order.

use std::collections::VecDeque;

use anyhow::{Result, bail};
use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};

use crate::{Timestamped, Watermark};

/// Creates a channel whose receiving end never delivers an item older than the previous one.
pub fn ordered_channel<T: Timestamped>() -> (UnboundedSender<T>, OrderedReceiver<T>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (sender, OrderedReceiver::new(receiver))
}

#[derive(Debug)]
pub struct OrderedReceiver<T: Timestamped> {
    receiver: UnboundedReceiver<T>,
    pending: VecDeque<T>,
    /// Timestamp of the most recent item that was accepted.
    watermark: Watermark,
    dropped: usize,
}

impl<T: Timestamped> From<UnboundedReceiver<T>> for OrderedReceiver<T> {
    fn from(receiver: UnboundedReceiver<T>) -> Self {
        Self::new(receiver)
    }
}

impl<T: Timestamped> OrderedReceiver<T> {
    pub fn new(receiver: UnboundedReceiver<T>) -> Self {
        Self {
            receiver,
            pending: VecDeque::new(),
            watermark: Watermark::default(),
            dropped: 0,
        }
    }

    /// Receives the next item and returns an error when all senders disconnected and no items
    /// are left.
    pub async fn recv(&mut self) -> Result<T> {
        loop {
            // Pull in every item we can get.
            let mut disconnected = false;
            loop {
                match self.receiver.try_recv() {
                    Ok(item) => self.accept(item),
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                    Err(TryRecvError::Empty) => break,
                }
            }

            if let Some(item) = self.pending.pop_front() {
                return Ok(item);
            }

            if disconnected {
                bail!("Sender disconnected");
            }

            // Nothing yet, now we wait.
            match self.receiver.recv().await {
                Some(item) => self.accept(item),
                None => bail!("Sender disconnected"),
            }

            if let Some(item) = self.pending.pop_front() {
                return Ok(item);
            }
        }
    }

    /// Number of items dropped because they arrived out of order.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn accept(&mut self, item: T) {
        if self.watermark.advance(item.timestamp()) {
            self.pending.push_back(item);
        } else {
            warn!("Dropped an item that arrived with an earlier timestamp");
            self.dropped += 1;
        }
    }
}
