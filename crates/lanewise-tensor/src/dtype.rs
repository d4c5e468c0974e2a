/// The element type tag carried by every tensor.
///
/// Type-erased views keep this tag next to their raw pointer so that consumers can route a
/// call to the matching typed implementation at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 32-bit IEEE-754 floating point.
    Float32,
    /// 64-bit IEEE-754 floating point.
    Float64,
    /// 32-bit signed integer.
    Int32,
    /// 32-bit unsigned integer.
    UInt32,
    /// 8-bit unsigned integer.
    UInt8,
}

impl DataType {
    /// Returns the size in bytes of one element of this type.
    pub const fn size_of(&self) -> usize {
        match self {
            DataType::Float32 => 4,
            DataType::Float64 => 8,
            DataType::Int32 => 4,
            DataType::UInt32 => 4,
            DataType::UInt8 => 1,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Int32 => "int32",
            DataType::UInt32 => "uint32",
            DataType::UInt8 => "uint8",
        };
        f.write_str(name)
    }
}

/// A scalar type that can be stored in a tensor.
///
/// The associated [`DataType`] is what a type-erased view reports for tensors of this type.
pub trait Element: Copy + Send + Sync + 'static {
    /// The runtime tag of this element type.
    const DATA_TYPE: DataType;
}

macro_rules! impl_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DATA_TYPE: DataType = DataType::$tag;
            }
        )*
    };
}

impl_element! {
    f32 => Float32,
    f64 => Float64,
    i32 => Int32,
    u32 => UInt32,
    u8 => UInt8,
}
