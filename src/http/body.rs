//! Response body type

use http_body_util::Full;
use hyper::body::{Body, Bytes, Frame, SizeHint};
use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Fixed-size response body.
///
/// Never reports end-of-stream before it is polled. hyper then writes the
/// `Content-Length` header where the handler placed it, even for empty
/// bodies, instead of appending its own after every other header.
#[derive(Debug)]
pub struct ResponseBody(Full<Bytes>);

impl ResponseBody {
    pub fn new(data: Bytes) -> Self {
        Self(Full::new(data))
    }

    pub fn empty() -> Self {
        Self::new(Bytes::new())
    }
}

impl Body for ResponseBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.get_mut().0).poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        false
    }

    fn size_hint(&self) -> SizeHint {
        self.0.size_hint()
    }
}
