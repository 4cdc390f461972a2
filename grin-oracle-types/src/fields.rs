//! Serde helpers for Baby JubJub field elements and curve points.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeSeq as _;
use serde::{de, Deserializer, Serializer};

type BaseField = ark_ed_on_bn254::Fq;
type ScalarField = ark_ed_on_bn254::Fr;
type Affine = ark_ed_on_bn254::EdwardsAffine;

/// Serializes a base-field element as a decimal string.
pub fn serialize_fq<S: Serializer>(f: &BaseField, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&f.to_string())
}

/// Serializes a scalar-field element as a decimal string.
pub fn serialize_fr<S: Serializer>(f: &ScalarField, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&f.to_string())
}

/// Serializes an affine point as a `[x, y]` sequence of decimal strings.
pub fn serialize_affine<S: Serializer>(p: &Affine, ser: S) -> Result<S::Ok, S::Error> {
    let mut seq = ser.serialize_seq(Some(2))?;
    seq.serialize_element(&p.x.to_string())?;
    seq.serialize_element(&p.y.to_string())?;
    seq.end()
}

pub fn deserialize_fq<'de, D>(deserializer: D) -> Result<BaseField, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(FieldVisitor::<BaseField>::new("a base-field element"))
}

pub fn deserialize_fr<'de, D>(deserializer: D) -> Result<ScalarField, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(FieldVisitor::<ScalarField>::new("a scalar-field element"))
}

/// Deserializes an affine point, rejecting anything off the curve or
/// outside the prime-order subgroup.
pub fn deserialize_affine<'de, D>(deserializer: D) -> Result<Affine, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_seq(AffineVisitor)
}

struct FieldVisitor<F> {
    expecting: &'static str,
    _marker: std::marker::PhantomData<F>,
}

impl<F> FieldVisitor<F> {
    fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'de, F: ark_ff::PrimeField> de::Visitor<'de> for FieldVisitor<F> {
    type Value = F;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        F::from_str(v).map_err(|_| de::Error::custom("invalid field element"))
    }
}

struct AffineVisitor;

impl<'de> de::Visitor<'de> for AffineVisitor {
    type Value = Affine;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an affine point as [x, y] decimal strings")
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let x: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::custom("missing x coordinate"))?;
        let y: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::custom("missing y coordinate"))?;
        let x = BaseField::from_str(&x).map_err(|_| de::Error::custom("invalid x coordinate"))?;
        let y = BaseField::from_str(&y).map_err(|_| de::Error::custom("invalid y coordinate"))?;
        let p = Affine::new_unchecked(x, y);
        if !p.is_on_curve() {
            return Err(de::Error::custom("point is not on the curve"));
        }
        if !p.is_in_correct_subgroup_assuming_on_curve() {
            return Err(de::Error::custom("point is not in the prime-order subgroup"));
        }
        Ok(p)
    }
}
