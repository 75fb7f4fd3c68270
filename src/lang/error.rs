use super::LineNumber;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    line_number: LineNumber,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    pub fn is_direct(&self) -> bool {
        self.line_number.is_none()
    }

    /// Parse and lexical errors. Everything else is a runtime error.
    pub fn is_syntax(&self) -> bool {
        self.code == ErrorCode::SyntaxError as u16
    }

    pub fn in_line_number(&self, line: LineNumber) -> Error {
        Error {
            code: self.code,
            line_number: line,
            message: self.message.clone(),
        }
    }

    pub fn message<S: Into<String>>(&self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        Error {
            code: self.code,
            line_number: self.line_number,
            message: message.into(),
        }
    }
}

pub enum ErrorCode {
    Break = 0,
    NextWithoutFor = 1,
    SyntaxError = 2,
    ReturnWithoutGosub = 3,
    OutOfData = 4,
    IllegalFunctionCall = 5,
    OutOfMemory = 7,
    UndefinedLine = 8,
    SubscriptOutOfRange = 9,
    RedimensionedArray = 10,
    TypeMismatch = 13,
    UndefinedUserFunction = 18,
    InternalError = 51,
    InputPastEnd = 62,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            0 => "BREAK",
            1 => "NEXT WITHOUT FOR",
            2 => "SYNTAX ERROR",
            3 => "RETURN WITHOUT GOSUB",
            4 => "OUT OF DATA",
            5 => "ILLEGAL FUNCTION CALL",
            7 => "OUT OF MEMORY",
            8 => "UNDEFINED LINE",
            9 => "SUBSCRIPT OUT OF RANGE",
            10 => "REDIMENSIONED ARRAY",
            13 => "TYPE MISMATCH",
            18 => "UNDEFINED USER FUNCTION",
            51 => "INTERNAL ERROR",
            62 => "INPUT PAST END",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" {}", line_number));
        }
        let message = if self.message.is_empty() {
            String::new()
        } else {
            format!("; {}", self.message)
        };
        if code_str.is_empty() {
            if suffix.is_empty() {
                write!(f, "PROGRAM ERROR {}{}", self.code, message)
            } else {
                write!(f, "PROGRAM ERROR {} IN{}{}", self.code, suffix, message)
            }
        } else if suffix.is_empty() {
            write!(f, "{}{}", code_str, message)
        } else {
            write!(f, "{} IN{}{}", code_str, suffix, message)
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = error!(TypeMismatch, Some(20); "NUMBER EXPECTED");
        assert_eq!(e.to_string(), "TYPE MISMATCH IN 20; NUMBER EXPECTED");
        let e = error!(OutOfData);
        assert_eq!(e.to_string(), "OUT OF DATA");
        assert!(e.is_direct());
        assert!(!e.is_syntax());
        assert!(error!(SyntaxError).is_syntax());
    }
}
