//! Deferred self-calls
//!
//! A contract with a time-based obligation keeps at most one timer per scope.
//! Arming a scope replaces whatever was pending for it. Every block the chain
//! invokes `sudo(Tick {})`; the contract takes all due scopes out of the table
//! and fires each one as a self-call. Failures of a fired call are caught in
//! `reply`, so one bad scope never reverts the others and nothing is retried.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Event, Order, Reply, Response, StdError, StdResult, Storage, SubMsg,
    SubMsgResult, Timestamp, WasmMsg,
};
use cw_storage_plus::{Bound, Map, PrefixBound};
use serde::Serialize;

/// Reply id used for every deferred self-call
pub const DEFERRED_REPLY_ID: u64 = 1;

/// Privileged messages sent by the chain
#[cw_serde]
pub enum SudoMsg {
    /// Fire every deferred call whose time has come
    Tick {},
}

/// Timer table keyed by scope, holding the due time in seconds. A second map
/// keyed by `(due, scope)` orders the armed timers by due time, so a tick only
/// walks the timers that expired.
pub struct Deferred<'a> {
    timers: Map<'a, &'a str, u64>,
    queue: Map<'a, (u64, &'a str), ()>,
}

impl<'a> Deferred<'a> {
    pub const fn new(namespace: &'a str, queue_namespace: &'a str) -> Self {
        Self {
            timers: Map::new(namespace),
            queue: Map::new(queue_namespace),
        }
    }

    /// Arm the timer for `scope`, replacing a pending one.
    pub fn arm(&self, storage: &mut dyn Storage, scope: &str, due: Timestamp) -> StdResult<()> {
        self.cancel(storage, scope)?;
        self.timers.save(storage, scope, &due.seconds())?;
        self.queue.save(storage, (due.seconds(), scope), &())
    }

    pub fn cancel(&self, storage: &mut dyn Storage, scope: &str) -> StdResult<()> {
        if let Some(at) = self.timers.may_load(storage, scope)? {
            self.queue.remove(storage, (at, scope));
            self.timers.remove(storage, scope);
        }
        Ok(())
    }

    pub fn due_at(&self, storage: &dyn Storage, scope: &str) -> StdResult<Option<u64>> {
        self.timers.may_load(storage, scope)
    }

    /// Armed timers ordered by scope, one page after `start_after`.
    pub fn pending(
        &self,
        storage: &dyn Storage,
        start_after: Option<&str>,
        limit: usize,
    ) -> StdResult<Vec<(String, u64)>> {
        self.timers
            .range(
                storage,
                start_after.map(Bound::exclusive),
                None,
                Order::Ascending,
            )
            .take(limit)
            .collect()
    }

    /// Remove and return every scope due at or before `now`, earliest first.
    pub fn take_due(&self, storage: &mut dyn Storage, now: Timestamp) -> StdResult<Vec<String>> {
        let due = self
            .queue
            .prefix_range(
                storage,
                None,
                Some(PrefixBound::inclusive(now.seconds())),
                Order::Ascending,
            )
            .map(|item| item.map(|((at, scope), _)| (at, scope)))
            .collect::<StdResult<Vec<_>>>()?;
        for (at, scope) in &due {
            self.queue.remove(storage, (*at, scope.as_str()));
            self.timers.remove(storage, scope);
        }
        Ok(due.into_iter().map(|(_, scope)| scope).collect())
    }
}

/// Build the self-call that runs a deferred `msg`.
pub fn fire<T: Serialize>(contract: &Addr, msg: &T) -> StdResult<SubMsg> {
    Ok(SubMsg::reply_on_error(
        WasmMsg::Execute {
            contract_addr: contract.to_string(),
            msg: to_json_binary(msg)?,
            funds: vec![],
        },
        DEFERRED_REPLY_ID,
    ))
}

/// Swallow the failure of a deferred call, recording it as an event.
pub fn handle_reply(reply: Reply) -> StdResult<Response> {
    if reply.id != DEFERRED_REPLY_ID {
        return Err(StdError::generic_err(format!(
            "unknown reply id {}",
            reply.id
        )));
    }
    match reply.result {
        SubMsgResult::Err(error) => Ok(Response::new().add_event(
            Event::new("deferred_failure")
                .add_attribute("id", reply.id.to_string())
                .add_attribute("error", error),
        )),
        SubMsgResult::Ok(_) => Ok(Response::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    const TIMERS: Deferred = Deferred::new("timers", "timers_due");

    #[test]
    fn test_arm_replaces_pending_timer() {
        let mut storage = MockStorage::new();
        TIMERS
            .arm(&mut storage, "eun2ce", Timestamp::from_seconds(100))
            .unwrap();
        TIMERS
            .arm(&mut storage, "eun2ce", Timestamp::from_seconds(50))
            .unwrap();

        assert_eq!(TIMERS.due_at(&storage, "eun2ce").unwrap(), Some(50));
        assert_eq!(TIMERS.pending(&storage, None, 30).unwrap().len(), 1);
    }

    #[test]
    fn test_take_due_only_removes_expired_scopes() {
        let mut storage = MockStorage::new();
        TIMERS
            .arm(&mut storage, "alice", Timestamp::from_seconds(10))
            .unwrap();
        TIMERS
            .arm(&mut storage, "bob", Timestamp::from_seconds(20))
            .unwrap();
        TIMERS
            .arm(&mut storage, "carol", Timestamp::from_seconds(30))
            .unwrap();

        let due = TIMERS
            .take_due(&mut storage, Timestamp::from_seconds(20))
            .unwrap();
        assert_eq!(due, vec!["alice".to_string(), "bob".to_string()]);
        assert_eq!(
            TIMERS.pending(&storage, None, 30).unwrap(),
            vec![("carol".to_string(), 30)]
        );

        TIMERS.cancel(&mut storage, "carol").unwrap();
        assert!(TIMERS.pending(&storage, None, 30).unwrap().is_empty());
    }

    #[test]
    fn test_take_due_skips_future_timers() {
        let mut storage = MockStorage::new();
        for i in 0..50u64 {
            TIMERS
                .arm(
                    &mut storage,
                    &format!("later{i:02}"),
                    Timestamp::from_seconds(1_000 + i),
                )
                .unwrap();
        }
        TIMERS
            .arm(&mut storage, "zed", Timestamp::from_seconds(5))
            .unwrap();
        TIMERS
            .arm(&mut storage, "amy", Timestamp::from_seconds(7))
            .unwrap();
        // re-arming moves the scope in the due queue
        TIMERS
            .arm(&mut storage, "later49", Timestamp::from_seconds(6))
            .unwrap();

        let due = TIMERS
            .take_due(&mut storage, Timestamp::from_seconds(10))
            .unwrap();
        assert_eq!(
            due,
            vec!["zed".to_string(), "later49".to_string(), "amy".to_string()]
        );
        assert_eq!(TIMERS.pending(&storage, None, 100).unwrap().len(), 49);
        assert!(TIMERS
            .take_due(&mut storage, Timestamp::from_seconds(10))
            .unwrap()
            .is_empty());

        let page = TIMERS.pending(&storage, Some("later10"), 3).unwrap();
        assert_eq!(
            page.iter().map(|(scope, _)| scope.as_str()).collect::<Vec<_>>(),
            vec!["later11", "later12", "later13"]
        );
    }

    #[test]
    fn test_failed_call_is_recorded() {
        let reply = Reply {
            id: DEFERRED_REPLY_ID,
            result: SubMsgResult::Err("withdrawal requests not found".to_string()),
        };
        let res = handle_reply(reply).unwrap();
        assert_eq!(res.events.len(), 1);
        assert_eq!(res.events[0].ty, "deferred_failure");

        let unknown = Reply {
            id: 7,
            result: SubMsgResult::Err("boom".to_string()),
        };
        assert!(handle_reply(unknown).is_err());
    }
}
