//! 目录定义宏
//!
//! ```ignore
//! error_message_ids! {
//!     pub enum ErrorMessageId {
//!         #[sentinel] LazyError,
//!         #[sentinel] NoExplanation,
//!         EmptyCatchOrFinallyBlock,
//!         #[retired] DummyAvailable1,
//!     }
//! }
//! ```
//!
//! 声明顺序即注册顺序。只能在末尾追加；不再使用的种类加上 `#[retired]`，不要删除。

/// 定义一个封闭的诊断种类枚举，并生成按声明顺序构建注册表的代码
#[macro_export]
macro_rules! error_message_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$marker:ident])? $variant:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $( $variant, )*
        }

        impl $name {
            /// 按序数排列的全部槽位
            pub const ALL: &'static [$name] = &[$( $name::$variant, )*];

            const NAMES: &'static [&'static str] = &[$( stringify!($variant), )*];

            /// 声明时的名称（退役槽位在注册表中另有占位名）
            #[inline]
            pub const fn name(self) -> &'static str {
                Self::NAMES[self as usize]
            }

            #[inline]
            pub const fn ordinal(self) -> $crate::registry::Ordinal {
                $crate::registry::Ordinal::new(self as u32)
            }

            /// 按声明顺序注册全部槽位
            pub fn register_all(
                builder: &mut $crate::registry::RegistryBuilder,
            ) -> ::std::result::Result<(), $crate::registry::RegistryError> {
                $( $crate::__register_slot!(builder, $variant $(, $marker)?); )*
                Ok(())
            }

            /// 注册并冻结
            pub fn build_registry(
                numbering: $crate::registry::Numbering,
            ) -> ::std::result::Result<$crate::registry::Registry, $crate::registry::RegistryError> {
                let mut builder =
                    $crate::registry::RegistryBuilder::with_capacity(numbering, Self::ALL.len());
                Self::register_all(&mut builder)?;
                builder.finish()
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __register_slot {
    ($builder:ident, $variant:ident) => {
        $builder.register(stringify!($variant))?;
    };
    ($builder:ident, $variant:ident, sentinel) => {
        $builder.register_sentinel(stringify!($variant))?;
    };
    ($builder:ident, $variant:ident, retired) => {
        $builder.register(stringify!($variant))?;
        $builder.retire(stringify!($variant))?;
    };
}
