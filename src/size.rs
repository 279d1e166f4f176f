//! Approximate sizing of keys and values.
//!
//! Size limits are enforced against the length of a value's textual
//! representation rather than an exact serialized size. Strings report their
//! UTF-8 length, numbers the length of their decimal form, and raw byte
//! buffers their byte count.
//!
//! `Option<T>` is measurable so that nullable values can flow through the
//! same API; `None` reports itself as null and is rejected by validation.

use bytes::Bytes;
use std::sync::Arc;

/// A type whose size can be estimated for limit checks.
pub trait ApproxSize {
    /// Length in bytes of the textual representation.
    fn approx_size(&self) -> usize;

    /// Whether this is an absent value. Null keys and values are rejected.
    fn is_null(&self) -> bool {
        false
    }
}

impl ApproxSize for str {
    fn approx_size(&self) -> usize {
        self.len()
    }
}

impl ApproxSize for String {
    fn approx_size(&self) -> usize {
        self.len()
    }
}

impl ApproxSize for char {
    fn approx_size(&self) -> usize {
        self.len_utf8()
    }
}

impl ApproxSize for bool {
    fn approx_size(&self) -> usize {
        if *self {
            4
        } else {
            5
        }
    }
}

macro_rules! impl_approx_size_via_display {
    ($($t:ty),* $(,)?) => {
        $(
            impl ApproxSize for $t {
                fn approx_size(&self) -> usize {
                    self.to_string().len()
                }
            }
        )*
    };
}

impl_approx_size_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl ApproxSize for Bytes {
    fn approx_size(&self) -> usize {
        self.len()
    }
}

impl ApproxSize for [u8] {
    fn approx_size(&self) -> usize {
        self.len()
    }
}

impl ApproxSize for Vec<u8> {
    fn approx_size(&self) -> usize {
        self.len()
    }
}

impl<T: ApproxSize> ApproxSize for Option<T> {
    fn approx_size(&self) -> usize {
        self.as_ref().map_or(0, ApproxSize::approx_size)
    }

    fn is_null(&self) -> bool {
        self.as_ref().map_or(true, ApproxSize::is_null)
    }
}

impl<T: ApproxSize + ?Sized> ApproxSize for &T {
    fn approx_size(&self) -> usize {
        (**self).approx_size()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: ApproxSize + ?Sized> ApproxSize for Box<T> {
    fn approx_size(&self) -> usize {
        (**self).approx_size()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: ApproxSize + ?Sized> ApproxSize for Arc<T> {
    fn approx_size(&self) -> usize {
        (**self).approx_size()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings_use_utf8_length() {
        assert_eq!("abc".approx_size(), 3);
        assert_eq!(String::from("héllo").approx_size(), 6);
        assert_eq!('é'.approx_size(), 2);
    }

    #[test]
    fn test_numbers_use_decimal_form() {
        assert_eq!(42u32.approx_size(), 2);
        assert_eq!((-1234i64).approx_size(), 5);
        assert_eq!(1.5f64.approx_size(), 3);
        assert_eq!(true.approx_size(), 4);
        assert_eq!(false.approx_size(), 5);
    }

    #[test]
    fn test_byte_buffers_use_raw_length() {
        assert_eq!(Bytes::from_static(b"\x00\x01\x02").approx_size(), 3);
        assert_eq!(vec![0u8; 10].approx_size(), 10);
    }

    #[test]
    fn test_wrappers_delegate() {
        let shared: Arc<str> = Arc::from("four");
        assert_eq!(shared.approx_size(), 4);
        assert_eq!(Box::new(String::from("xy")).approx_size(), 2);
        assert_eq!(Some(String::from("abc")).approx_size(), 3);
        assert_eq!(None::<String>.approx_size(), 0);
        assert_eq!((&"key").approx_size(), 3);
    }

    #[test]
    fn test_only_none_is_null() {
        assert!(None::<String>.is_null());
        assert!(Some(None::<u32>).is_null());
        assert!(Arc::new(None::<String>).is_null());
        assert!(!Some(String::new()).is_null());
        assert!(!"".is_null());
        assert!(!0u8.is_null());
    }
}
