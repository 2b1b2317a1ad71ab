use std::sync::Arc;

use serde::Serialize;

use crate::{
    core::{
        pager,
        search::SearchState,
        types::{DescriptorInput, Intent, PagerConfig},
    },
    error::{AppError, AppResult},
    store::{KvStore, SearchStore, SessionStore},
};

use super::protocol::*;

pub struct BridgeHandler {
    cfg: PagerConfig,
    sessions: SessionStore,
    searches: SearchStore,
}

impl BridgeHandler {
    pub fn new(cfg: PagerConfig, store: Arc<dyn KvStore>) -> Self {
        Self {
            cfg,
            sessions: SessionStore::new(store.clone()),
            searches: SearchStore::new(store),
        }
    }

    pub fn handle(&mut self, mut req: BridgeRequest) -> BridgeResponse<serde_json::Value> {
        if req.v != 1 {
            return BridgeResponse::err(
                req.v,
                req.id,
                "INVALID_REQUEST",
                format!("unsupported protocol version: {}", req.v),
            );
        }

        let payload = std::mem::take(&mut req.payload);
        let res = match req.cmd.as_str() {
            "render" => self.handle_render(payload),
            "click" => self.handle_click(payload),
            "select_limit" => self.handle_select_limit(payload),
            "search_parse" => self.handle_search_parse(payload),
            "search_load" => self.handle_search_load(),
            "search_save" => self.handle_search_save(payload),
            "search_apply" => self.handle_search_apply(payload),
            "search_reset" => self.searches.reset().map(|_| serde_json::Value::Bool(true)),
            "login" => self.handle_login(payload),
            "session" => self.sessions.current().and_then(to_json),
            "require_session" => self.sessions.require().and_then(to_json),
            "logout" => self.sessions.logout().map(|_| serde_json::Value::Bool(true)),
            other => Err(AppError::InvalidRequest(format!("unknown cmd: {other}"))),
        };

        match res {
            Ok(data) => BridgeResponse::ok(req.v, req.id, data),
            Err(e) => {
                tracing::debug!(cmd = %req.cmd, code = e.code(), error = %e, "request failed");
                BridgeResponse::err(req.v, req.id, e.code(), e.to_string())
            }
        }
    }

    fn handle_render(&self, payload: serde_json::Value) -> AppResult<serde_json::Value> {
        let input: DescriptorInput = parse_payload(payload)?;
        to_json(pager::render(&input.resolve(&self.cfg))?)
    }

    fn handle_click(&self, payload: serde_json::Value) -> AppResult<serde_json::Value> {
        let p: ClickPayload = parse_payload(payload)?;
        let mut intents: Vec<Intent> = Vec::with_capacity(1);
        pager::click(&p.descriptor.resolve(&self.cfg), p.control, &mut intents)?;
        single_intent(intents)
    }

    fn handle_select_limit(&self, payload: serde_json::Value) -> AppResult<serde_json::Value> {
        let p: SelectLimitPayload = parse_payload(payload)?;
        let mut intents: Vec<Intent> = Vec::with_capacity(1);
        pager::select_limit(&p.descriptor.resolve(&self.cfg), p.limit, &mut intents)?;
        single_intent(intents)
    }

    fn handle_search_parse(&self, payload: serde_json::Value) -> AppResult<serde_json::Value> {
        let p: SearchParsePayload = parse_payload(payload)?;
        let state = SearchState::from_query_string(&p.query_string);
        let descriptor = p
            .total_items
            .map(|n| state.descriptor(n, &self.cfg).normalize())
            .transpose()?;
        to_json(SearchResult::new(state, descriptor))
    }

    fn handle_search_load(&self) -> AppResult<serde_json::Value> {
        to_json(SearchResult::new(self.searches.load()?, None))
    }

    fn handle_search_save(&self, payload: serde_json::Value) -> AppResult<serde_json::Value> {
        let state: SearchState = parse_payload(payload)?;
        state.validate()?;
        self.searches.save(&state)?;
        to_json(SearchResult::new(state, None))
    }

    fn handle_search_apply(&self, payload: serde_json::Value) -> AppResult<serde_json::Value> {
        let p: SearchApplyPayload = parse_payload(payload)?;
        let mut state = self.searches.load()?;
        if let Some(q) = p.query {
            state = state.with_query(Some(q));
        }
        if let Some(intent) = p.intent {
            state.apply(intent)?;
        }
        self.searches.save(&state)?;
        to_json(SearchResult::new(state, None))
    }

    fn handle_login(&self, payload: serde_json::Value) -> AppResult<serde_json::Value> {
        let p: LoginPayload = parse_payload(payload)?;
        to_json(self.sessions.login(&p.username, &p.token)?)
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(payload: serde_json::Value) -> AppResult<T> {
    // Missing payload reads as an empty object so all-default requests stay short.
    let payload = match payload {
        serde_json::Value::Null => serde_json::Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(payload).map_err(|e| AppError::InvalidRequest(e.to_string()))
}

fn to_json<T: Serialize>(v: T) -> AppResult<serde_json::Value> {
    Ok(serde_json::to_value(v)?)
}

fn single_intent(intents: Vec<Intent>) -> AppResult<serde_json::Value> {
    let intent = intents
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Internal("pager raised no intent".into()))?;
    to_json(ClickResult { intent })
}
