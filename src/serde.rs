// Copyright 2021 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! serde implementation.
//!
//! Human readable formats carry the decimal string, binary formats carry the unscaled `i64`.

use crate::fmt::{write_unscaled, Buf};
use crate::{Decimal, MutableDecimal};
use std::convert::TryFrom;
use std::marker::PhantomData;

impl<const S: u8> serde::Serialize for Decimal<S> {
    #[inline]
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::ser::Serializer,
    {
        if serializer.is_human_readable() {
            let mut buf = Buf::new();
            write_unscaled(self.unscaled(), S, &mut buf).map_err(serde::ser::Error::custom)?;
            let str = unsafe { std::str::from_utf8_unchecked(buf.as_slice()) };
            serializer.serialize_str(str)
        } else {
            serializer.serialize_i64(self.unscaled())
        }
    }
}

impl<'de, const S: u8> serde::Deserialize<'de> for Decimal<S> {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        struct DecimalVisitor<const S: u8>(PhantomData<Decimal<S>>);

        impl<'de, const S: u8> serde::de::Visitor<'de> for DecimalVisitor<S> {
            type Value = Decimal<S>;

            #[inline]
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "a decimal with scale {}", S)
            }

            /// Values out of range are rejected rather than wrapped.
            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Decimal<S>, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(serde::de::Error::custom)
            }

            #[inline]
            fn visit_i64<E>(self, v: i64) -> Result<Decimal<S>, E>
            where
                E: serde::de::Error,
            {
                Ok(Decimal::from_unscaled(v))
            }

            #[inline]
            fn visit_u64<E>(self, v: u64) -> Result<Decimal<S>, E>
            where
                E: serde::de::Error,
            {
                match i64::try_from(v) {
                    Ok(v) => Ok(Decimal::from_unscaled(v)),
                    Err(_) => Err(serde::de::Error::invalid_value(serde::de::Unexpected::Unsigned(v), &self)),
                }
            }
        }

        let visitor = DecimalVisitor(PhantomData);
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(visitor)
        } else {
            deserializer.deserialize_i64(visitor)
        }
    }
}

impl<const S: u8> serde::Serialize for MutableDecimal<S> {
    #[inline]
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::ser::Serializer,
    {
        serde::Serialize::serialize(&self.to_immutable(), serializer)
    }
}

impl<'de, const S: u8> serde::Deserialize<'de> for MutableDecimal<S> {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        <Decimal<S> as serde::Deserialize>::deserialize(deserializer).map(MutableDecimal::new)
    }
}
