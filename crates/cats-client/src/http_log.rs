//! Tower middleware which logs every request a client sends to the
//! Kubernetes API server and every response it gets back.
//!
//! The layer is installed through [`kube::client::ClientBuilder::with_layer`]
//! and sits in front of the whole client stack, so it sees requests the way
//! the typed API produced them: the path, the query parameters and the patch
//! content type are all visible before authentication or transport concerns
//! kick in.
//!
//! The implementation follows the official Tower [middleware guide].
//!
//! [middleware guide]: https://github.com/tower-rs/tower/blob/master/guides/building-a-middleware-from-scratch.md

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use futures_util::ready;
use http::{Method, Request, Response, Uri};
use pin_project::pin_project;
use tower::{Layer, Service};
use tracing::debug;

/// A Tower [`Layer`] which decorates services with [`HttpLogService`].
#[derive(Clone, Debug, Default)]
pub struct HttpLogLayer;

impl HttpLogLayer {
    /// Creates a new HTTP log layer.
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for HttpLogLayer {
    type Service = HttpLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HttpLogService { inner }
    }
}

/// A Tower [`Service`] which logs the method and target of outgoing requests
/// and the status and elapsed time of their responses.
#[derive(Clone, Debug)]
pub struct HttpLogService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HttpLogService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let method = req.method().clone();
        let uri = req.uri().clone();
        debug!(http.method = %method, http.uri = %uri, "sending request");

        ResponseFuture {
            future: self.inner.call(req),
            started_at: Instant::now(),
            method,
            uri,
        }
    }
}

/// The response future for [`HttpLogService`], which carries the request
/// identity so the response can be attributed to it in the log.
#[pin_project]
pub struct ResponseFuture<F> {
    #[pin]
    future: F,

    started_at: Instant,
    method: Method,
    uri: Uri,
}

impl<F, ResBody, E> Future for ResponseFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let result = ready!(this.future.poll(cx));

        match &result {
            Ok(response) => debug!(
                http.method = %this.method,
                http.uri = %this.uri,
                http.status_code = response.status().as_u16(),
                elapsed = ?this.started_at.elapsed(),
                "received response"
            ),
            Err(_) => debug!(
                http.method = %this.method,
                http.uri = %this.uri,
                elapsed = ?this.started_at.elapsed(),
                "request failed"
            ),
        }

        Poll::Ready(result)
    }
}
