mod property_coercion;
mod property_roundtrip;
