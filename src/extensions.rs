use crate::errors::{MdError, Result};

/// Positional argument access for input-file commands, reporting failures
/// against the line they came from.
pub trait ArgsExt {
    fn get_required(&self, index: usize, line: usize) -> Result<&str>;
    fn parse_int_at(&self, index: usize, line: usize) -> Result<i64>;
    fn parse_usize_at(&self, index: usize, line: usize) -> Result<usize>;
    fn parse_float_at(&self, index: usize, line: usize) -> Result<f64>;
    fn parse_positive_float_at(&self, index: usize, line: usize) -> Result<f64>;
    fn parse_bool_at(&self, index: usize, line: usize) -> Result<bool>;
}

impl ArgsExt for [&str] {
    fn get_required(&self, index: usize, line: usize) -> Result<&str> {
        self.get(index)
            .copied()
            .ok_or(MdError::MissingArgument { line })
    }

    fn parse_int_at(&self, index: usize, line: usize) -> Result<i64> {
        let arg = self.get_required(index, line)?;
        arg.parse().map_err(|e| MdError::IntParseError {
            string: arg.to_string(),
            source: e,
        })
    }

    fn parse_usize_at(&self, index: usize, line: usize) -> Result<usize> {
        self.parse_int_at(index, line)?.convert_to_usize(line)
    }

    fn parse_float_at(&self, index: usize, line: usize) -> Result<f64> {
        let arg = self.get_required(index, line)?;
        arg.parse().map_err(|e| MdError::FloatParseError {
            string: arg.to_string(),
            source: e,
        })
    }

    fn parse_positive_float_at(&self, index: usize, line: usize) -> Result<f64> {
        let value = self.parse_float_at(index, line)?;
        if !(value.is_finite() && value > 0.0) {
            return Err(MdError::InvalidArgument {
                string: self[index].to_string(),
                line,
            });
        }
        Ok(value)
    }

    fn parse_bool_at(&self, index: usize, line: usize) -> Result<bool> {
        match self.get_required(index, line)? {
            "yes" | "on" | "true" => Ok(true),
            "no" | "off" | "false" => Ok(false),
            other => Err(MdError::InvalidArgument {
                string: other.to_string(),
                line,
            }),
        }
    }
}

pub trait IntToUsize {
    fn convert_to_usize(&self, line: usize) -> Result<usize>;
}

impl IntToUsize for i64 {
    fn convert_to_usize(&self, line: usize) -> Result<usize> {
        (*self)
            .try_into()
            .map_err(|_| MdError::NegativeValue { value: *self, line })
    }
}
