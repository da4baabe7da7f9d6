//! The `KeyValue` gRPC service, wrapping a [`kvengine_storage::Engine`].
//!
//! Every handler offloads its call into the engine via
//! `tokio::task::spawn_blocking`, since stripe-lock acquisition and the
//! WAL's fsync are exactly the blocking suspension points §5 of the spec
//! names — the engine itself stays a plain synchronous library, and the
//! `async` boundary lives entirely in this collaborator, matching the
//! spec's separation of "the core" from "external collaborators".

use crate::proto::key_value_server::KeyValue;
use crate::proto::{
    GetPrefixRequest, GetPrefixResponse, GetRequest, GetResponse, KeyValuePair as ProtoPair,
    SetRequest, SetResponse, StatRequest, StatResponse,
};

use kvengine_core::Error as EngineError;
use kvengine_storage::Engine;

use std::sync::Arc;
use tonic::{Request, Response, Status};

pub struct KeyValueService {
    engine: Arc<Engine>,
}

impl KeyValueService {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

fn engine_error_to_status(err: EngineError) -> Status {
    match err {
        EngineError::EmptyKey => Status::invalid_argument(err.to_string()),
        // I/O-Durability failures: surfaced directly to the client as a
        // failed RPC, per §7.
        other => Status::internal(other.to_string()),
    }
}

#[tonic::async_trait]
impl KeyValue for KeyValueService {
    async fn set(&self, request: Request<SetRequest>) -> Result<Response<SetResponse>, Status> {
        let req = request.into_inner();
        let engine = Arc::clone(&self.engine);

        let result = tokio::task::spawn_blocking(move || engine.put(req.key, req.value))
            .await
            .map_err(|e| Status::internal(format!("worker task panicked: {e}")))?;

        match result {
            Ok(()) => Ok(Response::new(SetResponse { success: true })),
            Err(e) => Err(engine_error_to_status(e)),
        }
    }

    async fn get(&self, request: Request<GetRequest>) -> Result<Response<GetResponse>, Status> {
        let req = request.into_inner();
        let engine = Arc::clone(&self.engine);

        let result = tokio::task::spawn_blocking(move || engine.get(&req.key))
            .await
            .map_err(|e| Status::internal(format!("worker task panicked: {e}")))?;

        match result {
            Ok(Some(value)) => Ok(Response::new(GetResponse { found: true, value })),
            Ok(None) => Ok(Response::new(GetResponse { found: false, value: Vec::new() })),
            Err(e) => Err(engine_error_to_status(e)),
        }
    }

    async fn get_prefix(
        &self,
        request: Request<GetPrefixRequest>,
    ) -> Result<Response<GetPrefixResponse>, Status> {
        let req = request.into_inner();
        let engine = Arc::clone(&self.engine);

        let pairs = tokio::task::spawn_blocking(move || {
            engine.get_prefix(&req.prefix, req.max_results)
        })
        .await
        .map_err(|e| Status::internal(format!("worker task panicked: {e}")))?;

        let pairs = pairs
            .into_iter()
            .map(|p| ProtoPair { key: p.key, value: p.value })
            .collect();

        Ok(Response::new(GetPrefixResponse { pairs }))
    }

    async fn stat(&self, _request: Request<StatRequest>) -> Result<Response<StatResponse>, Status> {
        let engine = Arc::clone(&self.engine);
        let snapshot = tokio::task::spawn_blocking(move || engine.stat())
            .await
            .map_err(|e| Status::internal(format!("worker task panicked: {e}")))?;

        Ok(Response::new(StatResponse {
            key_count: snapshot.key_count,
            total_requests: snapshot.total_requests,
            server_start_time: snapshot.start_time,
            set_count: snapshot.set_count,
            get_count: snapshot.get_count,
            getprefix_count: snapshot.getprefix_count,
        }))
    }
}
