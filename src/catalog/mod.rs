//! 参考诊断目录
//!
//! 编译器所有诊断种类的封闭枚举。**只能在末尾追加，永远不要删除或重排**：
//! 不再使用的种类标记为 `#[retired]`，它的序数与错误号永久保留。
//!
//! 目录在首次访问时构建、校验并冻结（[`catalog`]），之后只读。
//! 与已发布版本的比对见 [`crate::snapshot`]。

#[macro_use]
mod macros;

use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::registry::{
    DiagnosticKind, ErrorNumber, Numbering, Registry, RegistryError,
};

error_message_ids! {
    /// 编译器诊断种类的稳定标识
    pub enum ErrorMessageId {
        // E-2 / E-1: 哨兵，不对外发布
        #[sentinel] LazyError,
        #[sentinel] NoExplanation,
        // E000 起：真正的诊断
        EmptyCatchOrFinallyBlock,
        EmptyCatchBlock,
        EmptyCatchAndFinallyBlock,
        DeprecatedWithOperator,
        CaseClassMissingParamList,
        DuplicateBind,
        MissingIdent,
        TypeMismatch,
        NotAMember,
        EarlyDefinitionsNotSupported,
        TopLevelImplicitClass,
        ImplicitCaseClass,
        ObjectMayNotHaveSelfType,
        TupleTooLong,
        RepeatedModifier,
        InterpolatedStringError,
        UnboundPlaceholderParameter,
        IllegalStartSimpleExpr,
        MissingReturnType,
        YieldOrDoExpectedInForComprehension,
        ProperDefinitionNotFound,
        ByNameParameterNotSupported,
        WrongNumberOfTypeArgs,
        IllegalVariableInPatternAlternative,
        IdentifierExpected,
        AuxConstructorNeedsNonImplicitParameter,
        IncorrectRepeatedParameterSyntax,
        IllegalLiteral,
        PatternMatchExhaustivity,
        MatchCaseUnreachable,
        SeqWildcardPatternPos,
        IllegalStartOfSimplePattern,
        PkgDuplicateSymbol,
        ExistentialTypesNoLongerSupported,
        UnboundWildcardType,
        DanglingThisInPath,
        OverridesNothing,
        OverridesNothingButNameExists,
        ForwardReferenceExtendsOverDefinition,
        ExpectedTokenButFound,
        MixedLeftAndRightAssociativeOps,
        CantInstantiateAbstractClassOrTrait,
        #[retired] DummyAvailable1,
        OverloadedOrRecursiveMethodNeedsResultType,
        RecursiveValueNeedsResultType,
        CyclicReferenceInvolving,
        CyclicReferenceInvolvingImplicit,
        SuperQualMustBeParent,
        AmbiguousImport,
        MethodDoesNotTakeParameters,
        AmbiguousOverload,
        ReassignmentToVal,
        TypeDoesNotTakeParameters,
        ParameterizedTypeLacksArguments,
        VarValParametersMayNotBeCallByName,
        MissingTypeParameterFor,
        DoesNotConformToBound,
        DoesNotConformToSelfType,
        DoesNotConformToSelfTypeCantBeInstantiated,
        AbstractMemberMayNotHaveModifier,
        TopLevelCantBeImplicit,
        TypesAndTraitsCantBeImplicit,
        OnlyClassesCanBeAbstract,
        AbstractOverrideOnlyInTraits,
        TraitsMayNotBeFinal,
        NativeMembersMayNotHaveImplementation,
        OnlyClassesCanHaveDeclaredButUndefinedMembers,
        CannotExtendAnyVal,
        CannotHaveSameNameAs,
        ValueClassesMayNotDefineInner,
        ValueClassesMayNotDefineNonParameterField,
        ValueClassesMayNotDefineASecondaryConstructor,
        ValueClassesMayNotContainInitalization,
        ValueClassesMayNotBeAbstract,
        ValueClassesMayNotBeContainted,
        ValueClassesMayNotWrapItself,
        ValueClassParameterMayNotBeAVar,
        ValueClassNeedsExactlyOneValParam,
        OnlyCaseClassOrCaseObjectAllowed,
        ExpectedClassOrObjectDef,
        AnonymousFunctionMissingParamType,
        SuperCallsNotAllowedInline,
        ModifiersNotAllowed,
        WildcardOnTypeArgumentNotAllowedOnNew,
        ImplicitFunctionTypeNeedsNonEmptyParameterList,
        WrongNumberOfParameters,
        DuplicatePrivateProtectedQualifier,
    }
}

/// 参考目录的编号：两个哨兵
pub const CATALOG_NUMBERING: Numbering = Numbering::REFERENCE;

static CATALOG: Lazy<Registry> = Lazy::new(|| match build_catalog() {
    Ok(registry) => registry,
    // 目录不一致时不能继续运行；`errid validate` 与测试会在发布前暴露它
    Err(e) => panic!("diagnostic catalog is inconsistent: {}", e),
});

/// 构建并校验参考目录
pub fn build_catalog() -> Result<Registry, RegistryError> {
    ErrorMessageId::build_registry(CATALOG_NUMBERING)
}

/// 进程级只读目录
pub fn catalog() -> &'static Registry {
    &CATALOG
}

impl ErrorMessageId {
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn error_number(self) -> ErrorNumber {
        CATALOG_NUMBERING.error_number(self.ordinal())
    }

    /// 反查：错误号 -> 种类（包括退役槽位）
    pub fn from_error_number(number: ErrorNumber) -> Option<Self> {
        CATALOG_NUMBERING
            .ordinal_from_error_number(number)
            .and_then(|ordinal| Self::ALL.get(ordinal.index()).copied())
    }

    /// 对应的注册表条目
    pub fn kind(self) -> &'static DiagnosticKind {
        &catalog().entries()[self.ordinal().index()]
    }

    #[inline]
    pub fn is_retired(self) -> bool {
        self.kind().is_retired()
    }

    #[inline]
    pub fn is_sentinel(self) -> bool {
        self.error_number().is_sentinel()
    }

    /// 发布用的错误码，如 `E007`
    pub fn code(self) -> Option<String> {
        self.kind().code()
    }
}

impl std::fmt::Display for ErrorMessageId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorMessageId {
    type Err = RegistryError;

    /// 按名称解析；退役种类不再可用
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = catalog().resolve_name(s)?;
        Self::ALL
            .get(kind.ordinal().index())
            .copied()
            .ok_or(RegistryError::UnknownOrdinal(kind.ordinal()))
    }
}

impl From<ErrorMessageId> for ErrorNumber {
    fn from(id: ErrorMessageId) -> Self {
        id.error_number()
    }
}

impl TryFrom<ErrorNumber> for ErrorMessageId {
    type Error = RegistryError;

    fn try_from(number: ErrorNumber) -> Result<Self, Self::Error> {
        Self::from_error_number(number).ok_or(RegistryError::UnknownErrorNumber(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Ordinal;

    #[test]
    fn test_catalog_validates() {
        let registry = build_catalog().unwrap();
        assert_eq!(registry.len(), ErrorMessageId::COUNT);
        assert_eq!(registry.len(), 89);
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(ErrorMessageId::LazyError.error_number().get(), -2);
        assert_eq!(ErrorMessageId::NoExplanation.error_number().get(), -1);
        assert!(ErrorMessageId::LazyError.is_sentinel());
        assert_eq!(ErrorMessageId::NoExplanation.code(), None);
    }

    #[test]
    fn test_published_numbers() {
        assert_eq!(ErrorMessageId::EmptyCatchOrFinallyBlock.error_number().get(), 0);
        assert_eq!(ErrorMessageId::EmptyCatchBlock.error_number().get(), 1);
        assert_eq!(ErrorMessageId::EmptyCatchAndFinallyBlock.error_number().get(), 2);
        assert_eq!(ErrorMessageId::TypeMismatch.code().as_deref(), Some("E007"));
        assert_eq!(
            ErrorMessageId::DuplicatePrivateProtectedQualifier.error_number().get(),
            86
        );
    }

    #[test]
    fn test_retired_slot() {
        let id = ErrorMessageId::DummyAvailable1;
        assert_eq!(id.ordinal(), Ordinal::new(44));
        assert_eq!(id.error_number().get(), 42);
        assert!(id.is_retired());
        assert_eq!(id.kind().name(), "<unused-44>");
        assert_eq!(id.code(), None);
        assert!("DummyAvailable1".parse::<ErrorMessageId>().is_err());
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(
            ErrorMessageId::from_error_number(ErrorNumber::new(7)),
            Some(ErrorMessageId::TypeMismatch)
        );
        assert_eq!(ErrorMessageId::from_error_number(ErrorNumber::new(-3)), None);
        assert_eq!(ErrorMessageId::from_error_number(ErrorNumber::new(87)), None);
        assert_eq!(
            ErrorMessageId::try_from(ErrorNumber::new(1000)).unwrap_err(),
            RegistryError::UnknownErrorNumber(ErrorNumber::new(1000))
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "AmbiguousImport".parse::<ErrorMessageId>().unwrap(),
            ErrorMessageId::AmbiguousImport
        );
        assert!("NoSuchDiagnostic".parse::<ErrorMessageId>().is_err());
    }

    #[test]
    fn test_enum_matches_registry() {
        for &id in ErrorMessageId::ALL {
            let kind = id.kind();
            assert_eq!(kind.ordinal(), id.ordinal());
            assert_eq!(kind.error_number(), id.error_number());
            if !kind.is_retired() {
                assert_eq!(kind.name(), id.name());
            }
        }
    }
}
