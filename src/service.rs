//! Serving a [`Router`](crate::Router) of handler chains with hyper.
//!
//! A `Router<Box<dyn Handler>>` runs the handlers of each match in order.
//! A handler either answers the request or passes it on:
//!
//! ```rust,no_run
//! use segtrie::{Handler, Outcome, Params, Router};
//! use hyper::{Body, Request, Response};
//!
//! async fn log(req: Request<Body>) -> hyper::Result<Outcome> {
//!     println!("{}", req.uri());
//!     Ok(Outcome::Next(req))
//! }
//!
//! async fn hello(req: Request<Body>) -> hyper::Result<Outcome> {
//!     let params = req.extensions().get::<Params>().unwrap();
//!     let body = format!("Hello, {}", params.get("user").unwrap());
//!     Ok(Outcome::Respond(Response::new(body.into())))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router: Router<Box<dyn Handler>> = Router::new();
//!     let router = router
//!         .route("/hello/:user", log)?
//!         .route("/hello/:user", hello)?;
//!
//!     hyper::Server::bind(&([127, 0, 0, 1], 3000).into())
//!         .serve(router.into_service())
//!         .await?;
//!     Ok(())
//! }
//! ```
use crate::error::ConfigurationError;
use crate::router::Router;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::future;
use hyper::service::Service;
use hyper::{Body, Request, Response, StatusCode};

/// What a handler did with a request.
#[derive(Debug)]
pub enum Outcome {
    /// Hand the request to the next handler.
    Next(Request<Body>),
    /// Stop and send this response.
    Respond(Response<Body>),
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = hyper::Result<Outcome>> + Send>>;

/// Represents one link of a handler chain.
/// This trait is implemented for asynchronous functions that take a `Request` and return a
/// `hyper::Result<Outcome>`
/// ```rust
/// # use segtrie::{Handler, Outcome};
/// # use hyper::{Request, Body};
/// async fn pass(req: Request<Body>) -> hyper::Result<Outcome> {
///     Ok(Outcome::Next(req))
/// }
///
/// let handler: Box<dyn Handler> = Box::new(pass);
/// ```
pub trait Handler: Send + Sync {
    fn handle(&self, req: Request<Body>) -> HandlerFuture;
}

impl<F, R> Handler for F
where
    F: Fn(Request<Body>) -> R + Send + Sync,
    R: Future<Output = hyper::Result<Outcome>> + Send + 'static,
{
    fn handle(&self, req: Request<Body>) -> HandlerFuture {
        Box::pin(self(req))
    }
}

impl Router<Box<dyn Handler>> {
    /// Registers a handler, builder style.
    pub fn route(
        mut self,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> Result<Self, ConfigurationError> {
        self.insert(pattern, Box::new(handler))?;
        Ok(self)
    }

    /// Dispatches a request.
    ///
    /// Matches are visited in the order [`Router::at`] returns them. Before
    /// a match's handlers run, its [`Params`](crate::Params) replace any in
    /// the request extensions. The first handler to respond wins; if every
    /// handler passes, the response is `404 Not Found`.
    pub async fn serve(&self, mut req: Request<Body>) -> hyper::Result<Response<Body>> {
        let path = req.uri().path().to_owned();

        for matched in self.at(&path) {
            req.extensions_mut().insert(matched.params);

            for handler in matched.handlers {
                match handler.handle(req).await? {
                    Outcome::Next(next) => req = next,
                    Outcome::Respond(res) => return Ok(res),
                }
            }
        }

        tracing::debug!(path = %path, "no handler responded");
        Ok(not_found())
    }

    /// Converts the `Router` into a `Service` which you can serve directly with `Hyper`.
    pub fn into_service(self) -> MakeRouterService {
        MakeRouterService(RouterService(Arc::new(self)))
    }
}

fn not_found() -> Response<Body> {
    let mut res = Response::new(Body::empty());
    *res.status_mut() = StatusCode::NOT_FOUND;
    res
}

pub type ResponseFut = Pin<Box<dyn Future<Output = hyper::Result<Response<Body>>> + Send>>;

#[doc(hidden)]
pub struct MakeRouterService(RouterService);

impl<T> Service<T> for MakeRouterService {
    type Response = RouterService;
    type Error = hyper::Error;
    type Future = future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _: T) -> Self::Future {
        future::ok(self.0.clone())
    }
}

#[doc(hidden)]
#[derive(Clone)]
pub struct RouterService(Arc<Router<Box<dyn Handler>>>);

impl Service<Request<Body>> for RouterService {
    type Response = Response<Body>;
    type Error = hyper::Error;
    type Future = ResponseFut;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let router = Arc::clone(&self.0);
        Box::pin(async move { router.serve(req).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Params;

    use hyper::header::HeaderValue;

    async fn mark(mut req: Request<Body>) -> hyper::Result<Outcome> {
        req.headers_mut()
            .insert("x-marked", HeaderValue::from_static("yes"));
        Ok(Outcome::Next(req))
    }

    async fn pass(req: Request<Body>) -> hyper::Result<Outcome> {
        Ok(Outcome::Next(req))
    }

    async fn greet(req: Request<Body>) -> hyper::Result<Outcome> {
        let params = req.extensions().get::<Params>().cloned().unwrap_or_default();
        let mut res = Response::new(Body::empty());
        for param in &params {
            res.headers_mut().insert(
                hyper::header::HeaderName::from_bytes(format!("x-param-{}", param.key).as_bytes())
                    .unwrap(),
                HeaderValue::from_str(&param.value).unwrap(),
            );
        }
        if let Some(marked) = req.headers().get("x-marked") {
            res.headers_mut().insert("x-marked", marked.clone());
        }
        Ok(Outcome::Respond(res))
    }

    fn router() -> Router<Box<dyn Handler>> {
        Router::new()
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    fn header<'a>(res: &'a Response<Body>, name: &str) -> Option<&'a str> {
        res.headers().get(name).map(|v| v.to_str().unwrap())
    }

    #[tokio::test]
    async fn handlers_run_in_registration_order() {
        let router = router()
            .route("/hello/:user", mark)
            .unwrap()
            .route("/hello/:user", greet)
            .unwrap();

        let res = router.serve(request("/hello/alice")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(header(&res, "x-param-user"), Some("alice"));
        assert_eq!(header(&res, "x-marked"), Some("yes"));
    }

    #[tokio::test]
    async fn passing_handlers_fall_through_to_the_next_match() {
        let router = router()
            .route("/files/:name", pass)
            .unwrap()
            .route("/files/:rest*", greet)
            .unwrap();

        let res = router.serve(request("/files/a")).await.unwrap();
        assert_eq!(header(&res, "x-param-rest"), Some("a"));
        // params of the earlier match are replaced
        assert_eq!(header(&res, "x-param-name"), None);
    }

    #[tokio::test]
    async fn unanswered_requests_are_not_found() {
        let router = router().route("/a", pass).unwrap();

        let res = router.serve(request("/a")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = router.serve(request("/b")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serves_through_hyper_service() {
        let router = router().route("/item/:id(\\d+)", greet).unwrap();
        let mut make = router.into_service();
        let mut service = make.call(()).await.unwrap();

        let res = service.call(request("/item/42")).await.unwrap();
        assert_eq!(header(&res, "x-param-id"), Some("42"));

        let res = service.call(request("/item/abc")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_route_is_reported() {
        let err = router().route("/item/:id(+)", pass).err();
        assert!(err.is_some());
    }
}
