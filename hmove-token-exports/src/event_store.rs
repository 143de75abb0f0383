// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! This module represents an event store allowing to store, search and retrieve
//! the events emitted by the token

use crate::event::{EmittedEvent, EventContext, TokenEvent};
use hmove_models::{Address, BlockNumber};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Filter used when retrieving token events
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// optional start block (included)
    pub start: Option<BlockNumber>,
    /// optional end block (excluded)
    pub end: Option<BlockNumber>,
    /// optional account that must appear in the event
    pub involved_address: Option<Address>,
}

/// Append-only store of the events emitted by the token
#[derive(Default, Debug, Clone)]
pub struct EventStore(VecDeque<EmittedEvent>);

impl EventStore {
    /// Push a new event logged at `block`
    pub fn push(&mut self, block: BlockNumber, event: TokenEvent) -> &EmittedEvent {
        let index_in_block = match self.0.back() {
            Some(last) if last.context.block == block => last.context.index_in_block + 1,
            _ => 0,
        };
        self.0.push_back(EmittedEvent {
            context: EventContext {
                block,
                index_in_block,
            },
            event,
        });
        &self.0[self.0.len() - 1]
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// true if no event was stored
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all events in log order
    pub fn iter(&self) -> impl Iterator<Item = &EmittedEvent> {
        self.0.iter()
    }

    /// Get events optionally filtered by:
    /// * start block
    /// * end block
    /// * involved address
    pub fn get_filtered(&self, filter: &EventFilter) -> Vec<EmittedEvent> {
        self.0
            .iter()
            .filter(|x| {
                if let Some(start) = filter.start {
                    if x.context.block < start {
                        return false;
                    }
                }
                if let Some(end) = filter.end {
                    if x.context.block >= end {
                        return false;
                    }
                }
                if let Some(address) = &filter.involved_address {
                    if !x.event.involves(address) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    }
}
