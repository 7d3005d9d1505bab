/*!
    Rational number type for time bases and frame rates.
*/

use std::fmt;

/**
    A rational number represented as a numerator and denominator.

    Used for time bases (e.g., 1/25 for a 25 fps encoder) and frame rates
    (e.g., 30000/1001 for 29.97 fps).
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational number.

        # Panics

        Panics if `den` is zero.
    */
    #[inline]
    pub const fn new(num: i32, den: i32) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self { num, den }
    }

    /**
        Convert to f64.
    */
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /**
        Invert the rational (swap numerator and denominator).

        # Panics

        Panics if numerator is zero.
    */
    #[inline]
    pub const fn invert(self) -> Self {
        assert!(self.num != 0, "cannot invert zero");
        Self {
            num: self.den,
            den: self.num,
        }
    }

    /**
        Returns true if both terms are strictly positive.
    */
    #[inline]
    pub const fn is_positive(self) -> bool {
        (self.num > 0 && self.den > 0) || (self.num < 0 && self.den < 0)
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/**
    Converts `(num, den)`.

    # Panics

    Panics if `den` is zero, like [`Rational::new`].
*/
impl From<(i32, i32)> for Rational {
    fn from((num, den): (i32, i32)) -> Self {
        Self::new(num, den)
    }
}

impl From<i32> for Rational {
    fn from(num: i32) -> Self {
        Self::new(num, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rational() {
        let r = Rational::new(1, 25);
        assert_eq!(r.num, 1);
        assert_eq!(r.den, 25);
    }

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn zero_denominator_panics() {
        Rational::new(1, 0);
    }

    #[test]
    fn to_f64_conversion() {
        assert_eq!(Rational::new(1, 2).to_f64(), 0.5);
        assert_eq!(Rational::new(30000, 1001).to_f64(), 30000.0 / 1001.0);
    }

    #[test]
    fn invert() {
        let inv = Rational::new(30, 1).invert();
        assert_eq!(inv, Rational::new(1, 30));
    }

    #[test]
    #[should_panic(expected = "cannot invert zero")]
    fn invert_zero_panics() {
        Rational::new(0, 1).invert();
    }

    #[test]
    fn positivity() {
        assert!(Rational::new(25, 1).is_positive());
        assert!(!Rational::new(0, 1).is_positive());
        assert!(!Rational::new(-25, 1).is_positive());
    }

    #[test]
    fn from_conversions() {
        let r: Rational = (30000, 1001).into();
        assert_eq!(r, Rational::new(30000, 1001));

        let r: Rational = 25.into();
        assert_eq!(r, Rational::new(25, 1));
    }

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn tuple_with_zero_denominator_panics() {
        let _: Rational = (25, 0).into();
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rational::new(1, 90000)), "1/90000");
    }
}
