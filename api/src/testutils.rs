// Backoffice
// Copyright 2024 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Utilities to help testing code that consumes the resource clients.

use crate::errors::ApiResult;
use derivative::Derivative;
use futures::lock::Mutex;
use std::collections::VecDeque;

/// One mocked operation of a resource client.
///
/// Records every request the code under test issues and replies with canned responses in
/// FIFO order.  Tests prime responses with `returns` before exercising the code and then
/// inspect `requests` to validate what was sent.
#[derive(Derivative)]
#[derivative(Default(bound = ""))]
pub struct MockOp<Req, Resp> {
    /// All requests issued against this operation, oldest first.
    requests: Mutex<Vec<Req>>,

    /// Canned responses to serve, in order.
    responses: Mutex<VecDeque<ApiResult<Resp>>>,
}

impl<Req, Resp> MockOp<Req, Resp> {
    /// Primes the operation to serve `result` after any previously-primed responses.
    pub async fn returns(&self, result: ApiResult<Resp>) {
        self.responses.lock().await.push_back(result);
    }

    /// Records `request` and serves the next canned response.
    ///
    /// Panics when no response was primed because that always indicates a test bug.
    pub(crate) async fn call(&self, request: Req) -> ApiResult<Resp> {
        self.requests.lock().await.push(request);
        self.responses.lock().await.pop_front().expect("No canned response for this request")
    }

    /// Returns a copy of all requests issued so far, oldest first.
    pub async fn requests(&self) -> Vec<Req>
    where
        Req: Clone,
    {
        self.requests.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;

    #[tokio::test]
    async fn test_mockop_serves_responses_in_order() {
        let op = MockOp::<String, u32>::default();
        op.returns(Ok(1)).await;
        op.returns(Err(ApiError::Unknown)).await;

        assert_eq!(Ok(1), op.call("first".to_owned()).await);
        assert_eq!(Err(ApiError::Unknown), op.call("second".to_owned()).await);
        assert_eq!(vec!["first".to_owned(), "second".to_owned()], op.requests().await);
    }

    #[tokio::test]
    #[should_panic(expected = "No canned response")]
    async fn test_mockop_panics_without_canned_response() {
        let op = MockOp::<(), ()>::default();
        let _ = op.call(()).await;
    }
}
