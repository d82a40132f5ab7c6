quick_error! {
    #[derive(Debug, PartialEq)]
    pub enum Error {
        /// Fits file is not a multiple of 80 bytes long
        FailReadingNextBytes {
            display("A 80 bytes card could not be read. \
                A fits file must have a multiple of 80 characters.")
        }
        /// The first card of the file is not SIMPLE
        NotPrimaryHeader {
            display("The first card is not SIMPLE. This is not a primary FITS header.")
        }
        MissingKeyword(keyword: String) {
            display("{keyword} keyword has not been found.")
        }
        KeywordType(keyword: String, expected: &'static str) {
            display("{keyword} keyword does not hold a {expected} value.")
        }
        InvalidCard(message: String) {
            display("Invalid card: {message}")
        }
        /// NaN and infinities have no FITS fixed format representation
        NonFiniteValue(keyword: String) {
            display("{keyword} value is not finite and cannot be written.")
        }
        Pattern(message: String) {
            display("Invalid file pattern: {message}")
        }
        /// The output name computed for a file is the file itself
        OutputIsInput(path: String) {
            display("{path} would be overwritten by its own correction.")
        }
        Json(message: String) {
            display("Pointing origin table parsing: {message}")
        }
        Utf8 {
            from(std::str::Utf8Error)
            display("Fail to parse a keyword as a utf8 string")
        }
        /// IO error wrapping the std::io::Error
        Io(kind: std::io::ErrorKind) {
            // only the error kind is kept so that PartialEq can be derived
            from(err: std::io::Error) -> (err.kind())
            display("I/O error: {kind}")
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::Pattern(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
