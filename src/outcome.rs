//! Success/failure values and the combinators that thread them through
//! transformation chains.
//!
//! [`Outcome`] carries the result of a fallible computation as a value. It
//! converts freely to and from [`std::result::Result`]; the extra surface is
//! about composition (`fold`, `either`, `map_ok`, `map_err` and their curried
//! forms) and about bridging computations that fail *implicitly*, by
//! panicking ([`try_eval`]) or by settling a future as a failure
//! ([`from_async`]), into the explicit channel and back out again
//! ([`to_async_or_reject`]).
//!
//! # Examples
//!
//! ```
//! use esql_ast::outcome::{self, Outcome};
//!
//! let parsed: Outcome<i64, String> = outcome::ok(41);
//! let next = parsed.map_ok(|n| outcome::ok(n + 1));
//! assert_eq!(next.fold(|n| n.to_string(), |e| e), "42");
//!
//! let failed: Outcome<i64, String> = outcome::err("bad input".to_string());
//! assert!(failed.map_ok(|n| outcome::ok(n + 1)).is_err());
//! ```

use std::{
    any::Any,
    fmt,
    future::{Future, IntoFuture},
    panic::{self, UnwindSafe},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Either a success value or a failure value, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Outcome<T, E> {
    /// Success
    Ok(T),
    /// Failure
    Err(E),
}

/// Wraps a success value.
pub fn ok<T, E>(value: T) -> Outcome<T, E> {
    Outcome::Ok(value)
}

/// Wraps a failure value.
pub fn err<T, E>(error: E) -> Outcome<T, E> {
    Outcome::Err(error)
}

pub fn is_ok<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_ok()
}

pub fn is_err<T, E>(outcome: &Outcome<T, E>) -> bool {
    outcome.is_err()
}

/// Free-function form of [`Outcome::fold`].
pub fn fold<T, E, R>(
    outcome: Outcome<T, E>,
    on_ok: impl FnOnce(T) -> R,
    on_err: impl FnOnce(E) -> R,
) -> R {
    outcome.fold(on_ok, on_err)
}

impl<T, E> Outcome<T, E> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// The success value, if this is `Ok`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Err(_) => None,
        }
    }

    /// The failure value, if this is `Err`.
    pub fn error(&self) -> Option<&E> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Err(error) => Some(error),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(value),
            Outcome::Err(error) => Outcome::Err(error),
        }
    }

    /// Invokes exactly one of the handlers and returns what it returns.
    ///
    /// Every other combinator in this module is a specialisation of `fold`.
    pub fn fold<R>(self, on_ok: impl FnOnce(T) -> R, on_err: impl FnOnce(E) -> R) -> R {
        match self {
            Outcome::Ok(value) => on_ok(value),
            Outcome::Err(error) => on_err(error),
        }
    }

    /// Runs a side effect for whichever channel is present and hands the
    /// outcome back unchanged, so calls can be chained.
    pub fn either(self, on_ok: impl FnOnce(&T), on_err: impl FnOnce(&E)) -> Self {
        match &self {
            Outcome::Ok(value) => on_ok(value),
            Outcome::Err(error) => on_err(error),
        }
        self
    }

    /// Asynchronous form of [`Outcome::either`]: the selected handler's future
    /// is awaited before the outcome is handed back.
    pub async fn either_async<FO, FE>(
        self,
        on_ok: impl FnOnce(&T) -> FO,
        on_err: impl FnOnce(&E) -> FE,
    ) -> Self
    where
        FO: Future<Output = ()>,
        FE: Future<Output = ()>,
    {
        match &self {
            Outcome::Ok(value) => on_ok(value).await,
            Outcome::Err(error) => on_err(error).await,
        }
        self
    }

    /// Feeds the success value into `f`; a failure passes through untouched.
    pub fn map_ok<U>(self, f: impl FnOnce(T) -> Outcome<U, E>) -> Outcome<U, E> {
        self.fold(f, Outcome::Err)
    }

    /// Feeds the failure value into `f`; a success passes through untouched.
    pub fn map_err<F>(self, f: impl FnOnce(E) -> Outcome<T, F>) -> Outcome<T, F> {
        self.fold(Outcome::Ok, f)
    }

    /// Returns whichever payload is present.
    ///
    /// The caller has to know which branch it is on: both channels collapse
    /// into `T`.
    pub fn unwrap_or_error(self) -> T
    where
        E: Into<T>,
    {
        self.fold(|value| value, Into::into)
    }

    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(error) => Outcome::Err(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.fold(Ok, Err)
    }
}

/// Curried [`Outcome::fold`], for use in iterator and pipeline chains.
pub fn fold_with<T, E, R>(
    mut on_ok: impl FnMut(T) -> R,
    mut on_err: impl FnMut(E) -> R,
) -> impl FnMut(Outcome<T, E>) -> R {
    move |outcome| outcome.fold(&mut on_ok, &mut on_err)
}

/// Curried [`Outcome::map_ok`].
pub fn map_ok_with<T, U, E>(
    mut f: impl FnMut(T) -> Outcome<U, E>,
) -> impl FnMut(Outcome<T, E>) -> Outcome<U, E> {
    move |outcome| outcome.map_ok(&mut f)
}

/// Curried [`Outcome::map_err`].
pub fn map_err_with<T, E, F>(
    mut f: impl FnMut(E) -> Outcome<T, F>,
) -> impl FnMut(Outcome<T, E>) -> Outcome<T, F> {
    move |outcome| outcome.map_err(&mut f)
}

/// Payload of a panic captured by [`try_eval`].
pub struct Panic {
    payload: Box<dyn Any + Send>,
}

impl Panic {
    /// The panic message, when the payload is a string (the `panic!` case).
    pub fn message(&self) -> Option<&str> {
        if let Some(message) = self.payload.downcast_ref::<&'static str>() {
            Some(message)
        } else {
            self.payload.downcast_ref::<String>().map(String::as_str)
        }
    }

    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }
}

impl fmt::Debug for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panic").field("message", &self.message()).finish()
    }
}

impl fmt::Display for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "computation panicked: {}", message),
            None => write!(f, "computation panicked with a non-string payload"),
        }
    }
}

impl std::error::Error for Panic {}

/// Runs `f`, turning a panic into `Err` instead of letting it unwind further.
///
/// ```
/// use esql_ast::outcome::try_eval;
///
/// assert_eq!(try_eval(|| 2 + 2).value(), Some(&4));
/// ```
pub fn try_eval<T>(f: impl FnOnce() -> T + UnwindSafe) -> Outcome<T, Panic> {
    match panic::catch_unwind(f) {
        Ok(value) => Outcome::Ok(value),
        Err(payload) => {
            let panic = Panic { payload };
            log::debug!("try_eval captured a panic: {}", panic);
            Outcome::Err(panic)
        }
    }
}

/// How an asynchronous computation reported its failure.
///
/// Some producers wrap the actual error in an envelope; [`from_async`]
/// unwraps one level of it.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection<E> {
    Bare(E),
    Enveloped { error: E },
}

impl<E> Rejection<E> {
    pub fn into_error(self) -> E {
        match self {
            Rejection::Bare(error) => error,
            Rejection::Enveloped { error } => error,
        }
    }
}

impl<E> From<E> for Rejection<E> {
    fn from(error: E) -> Self {
        Rejection::Bare(error)
    }
}

impl Rejection<serde_json::Value> {
    /// Classifies a JSON failure payload: an object carrying a truthy
    /// `error` field is an envelope around that field.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(mut fields) => match fields.remove("error") {
                Some(error) if is_truthy(&error) => Rejection::Enveloped { error },
                Some(error) => {
                    fields.insert("error".to_string(), error);
                    Rejection::Bare(serde_json::Value::Object(fields))
                }
                None => Rejection::Bare(serde_json::Value::Object(fields)),
            },
            other => Rejection::Bare(other),
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Awaits `future` and captures how it settled.
pub async fn from_async<T, E, R, F>(future: F) -> Outcome<T, E>
where
    F: IntoFuture<Output = Result<T, R>>,
    R: Into<Rejection<E>>,
{
    match future.await {
        Ok(value) => Outcome::Ok(value),
        Err(rejection) => {
            let rejection = rejection.into();
            if matches!(rejection, Rejection::Enveloped { .. }) {
                log::trace!("unwrapping enveloped rejection");
            }
            Outcome::Err(rejection.into_error())
        }
    }
}

/// Moves the failure of an [`Outcome`]-producing future back onto the
/// future's own failure channel.
pub async fn to_async_or_reject<T, E, F>(future: F) -> Result<T, E>
where
    F: IntoFuture<Output = Outcome<T, E>>,
{
    future.await.into_result()
}

/// Like [`to_async_or_reject`], for futures that may themselves fail with
/// an `Outcome` payload. Such a payload is flattened one level and handled
/// exactly as if the future had resolved with it.
pub async fn to_async_or_reject_settled<T, E, F>(future: F) -> Result<T, E>
where
    F: IntoFuture<Output = Result<Outcome<T, E>, Outcome<T, E>>>,
{
    let outcome = match future.await {
        Ok(outcome) => outcome,
        Err(outcome) => {
            log::trace!("future failed with a wrapped outcome, flattening");
            outcome
        }
    };
    outcome.into_result()
}

#[derive(Serialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
enum TaggedRef<'a, T, E> {
    Ok { value: &'a T },
    Err { error: &'a E },
}

#[derive(Deserialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
enum Tagged<T, E> {
    Ok { value: T },
    Err { error: E },
}

/// Serialises as `{"tag":"ok","value":..}` / `{"tag":"err","error":..}`.
impl<T: Serialize, E: Serialize> Serialize for Outcome<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tagged: TaggedRef<'_, T, E> = match self {
            Outcome::Ok(value) => TaggedRef::Ok { value },
            Outcome::Err(error) => TaggedRef::Err { error },
        };
        tagged.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, E: Deserialize<'de>> Deserialize<'de> for Outcome<T, E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Tagged::deserialize(deserializer)? {
            Tagged::Ok { value } => Outcome::Ok(value),
            Tagged::Err { error } => Outcome::Err(error),
        })
    }
}
