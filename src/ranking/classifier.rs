use serde::{Serialize, Serializer};

/// Discrete star rating derived from a movie's percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarRating {
    Half,
    One,
    OneAndHalf,
    Two,
    TwoAndHalf,
    Three,
    ThreeAndHalf,
    Four,
    FourAndHalf,
    Five,
}

impl StarRating {
    /// Bands are inclusive on their lower bound and checked top-down.
    pub fn from_percentile(percentile: f64) -> Self {
        if percentile >= 90.0 {
            StarRating::Five
        } else if percentile >= 75.0 {
            StarRating::FourAndHalf
        } else if percentile >= 55.0 {
            StarRating::Four
        } else if percentile >= 35.0 {
            StarRating::ThreeAndHalf
        } else if percentile >= 20.0 {
            StarRating::Three
        } else if percentile >= 10.0 {
            StarRating::TwoAndHalf
        } else if percentile >= 5.0 {
            StarRating::Two
        } else if percentile >= 2.0 {
            StarRating::OneAndHalf
        } else if percentile >= 1.0 {
            StarRating::One
        } else {
            StarRating::Half
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            StarRating::Half => 0.5,
            StarRating::One => 1.0,
            StarRating::OneAndHalf => 1.5,
            StarRating::Two => 2.0,
            StarRating::TwoAndHalf => 2.5,
            StarRating::Three => 3.0,
            StarRating::ThreeAndHalf => 3.5,
            StarRating::Four => 4.0,
            StarRating::FourAndHalf => 4.5,
            StarRating::Five => 5.0,
        }
    }
}

impl Serialize for StarRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_lower_bounds_are_inclusive() {
        let bands = [
            (90.0, 5.0),
            (75.0, 4.5),
            (55.0, 4.0),
            (35.0, 3.5),
            (20.0, 3.0),
            (10.0, 2.5),
            (5.0, 2.0),
            (2.0, 1.5),
            (1.0, 1.0),
            (0.0, 0.5),
        ];

        for (percentile, stars) in bands {
            assert_eq!(StarRating::from_percentile(percentile).as_f64(), stars, "p = {percentile}");
        }
    }

    #[test]
    fn test_just_below_each_bound_falls_to_next_band() {
        let below = [
            (89.999, 4.5),
            (74.999, 4.0),
            (54.999, 3.5),
            (34.999, 3.0),
            (19.999, 2.5),
            (9.999, 2.0),
            (4.999, 1.5),
            (1.999, 1.0),
            (0.999, 0.5),
        ];

        for (percentile, stars) in below {
            assert_eq!(StarRating::from_percentile(percentile).as_f64(), stars, "p = {percentile}");
        }
    }

    #[test]
    fn test_extremes() {
        assert_eq!(StarRating::from_percentile(100.0), StarRating::Five);
        assert_eq!(StarRating::from_percentile(50.0), StarRating::ThreeAndHalf);
        assert_eq!(StarRating::from_percentile(0.0), StarRating::Half);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&StarRating::FourAndHalf).unwrap();
        assert_eq!(json, "4.5");
    }
}
