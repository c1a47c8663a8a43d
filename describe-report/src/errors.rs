// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::io;
use thiserror::Error;

/// An error that occurs while serializing a [`Report`](crate::Report).
///
/// Returned by [`Report::serialize`](crate::Report::serialize).
#[derive(Debug, Error)]
#[error("error serializing Markdown report")]
pub struct SerializeError {
    #[from]
    inner: io::Error,
}
