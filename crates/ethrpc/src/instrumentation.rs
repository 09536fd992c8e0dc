//! Transport layer that traces every JSON-RPC call made through a provider,
//! tagged with the provider's label.
use {
    alloy::{
        rpc::json_rpc::{RequestPacket, ResponsePacket},
        transports::{TransportError, TransportFut},
    },
    std::task::{Context, Poll},
    tower::{Layer, Service},
};

pub(crate) struct LoggingLayer {
    pub label: String,
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingProvider<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingProvider {
            inner,
            label: self.label.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoggingProvider<S> {
    inner: S,
    label: String,
}

impl<S> Service<RequestPacket> for LoggingProvider<S>
where
    S: Service<RequestPacket, Response = ResponsePacket, Error = TransportError>,
    S::Future: Send + 'static,
{
    type Error = TransportError;
    type Future = TransportFut<'static>;
    type Response = ResponsePacket;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: RequestPacket) -> Self::Future {
        let methods = method_names(&req);
        tracing::trace!(label = %self.label, ?methods, "executing request");

        let label = self.label.clone();
        let fut = self.inner.call(req);
        Box::pin(async move {
            let result = fut.await;
            if let Err(err) = &result {
                tracing::debug!(%label, ?methods, ?err, "request failed");
            }
            result
        })
    }
}

fn method_names(req: &RequestPacket) -> Vec<String> {
    match req {
        RequestPacket::Single(request) => vec![request.method().to_owned()],
        RequestPacket::Batch(requests) => requests
            .iter()
            .map(|request| request.method().to_owned())
            .collect(),
    }
}
