use std::fmt;

/// Enum listing possible errors from taqtaq-db.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The error message.
    Message(String),
    /// An any errors.
    AnyError,
}

/// Change the output error message.
///
/// The default is [ErrorLevel](./enum.ErrorLevel.html)::Develop for
/// debug builds and [ErrorLevel](./enum.ErrorLevel.html)::Release for
/// release builds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorLevel {
    /// No error message returned, always return Result::Ok(T).
    AlwaysOk,
    /// This is the level that should be set at release.
    Release,
    /// This is the level that should be set during development.
    Develop,

    #[cfg(debug_assertions)]
    /// Output more detailed messages during development.
    /// &#x26a0;&#xfe0f; **Not available when Release build**
    Debug,
}

impl Default for ErrorLevel {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ErrorLevel::Develop
        } else {
            ErrorLevel::Release
        }
    }
}

impl Error {
    #[allow(unused_variables)]
    pub(crate) fn new<T: Default, U: AsRef<str>>(
        error_level: &ErrorLevel,
        err_msg: &str,
        detail_msg: U,
    ) -> Result<T, Error> {
        match error_level {
            ErrorLevel::AlwaysOk => Ok(T::default()),
            ErrorLevel::Release => Err(Error::AnyError),
            ErrorLevel::Develop => Err(Error::Message(err_msg.to_string())),
            #[cfg(debug_assertions)]
            ErrorLevel::Debug => Err(Error::Message(format!("{}: {}", err_msg, detail_msg.as_ref()))),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message(s) => f.write_str(s),
            Error::AnyError => f.write_str("AnyError"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(debug_assertions)]
    fn error_level() {
        assert_eq!(ErrorLevel::default(), ErrorLevel::Develop);
        assert_eq!(Error::Message("test".to_string()).to_string(), "test");
        assert_eq!(
            Error::new::<(), _>(&ErrorLevel::AlwaysOk, "test", "test"),
            Ok(()));
        assert_eq!(
            Error::new::<(), _>(&ErrorLevel::Release, "test", "test"),
            Err(Error::AnyError));
        assert_eq!(
            Error::new::<(), _>(&ErrorLevel::Develop, "test", "test"),
            Err(Error::Message("test".into())));
        assert_eq!(
            Error::new::<(), _>(&ErrorLevel::Debug, "test", "test"),
            Err(Error::Message("test: test".into())));
    }

    #[test]
    fn always_ok_yields_default() {
        assert_eq!(Error::new::<u64, _>(&ErrorLevel::AlwaysOk, "x", "y"), Ok(0));
        assert_eq!(
            Error::new::<Vec<String>, _>(&ErrorLevel::AlwaysOk, "x", "y"),
            Ok(Vec::new()));
    }
}
