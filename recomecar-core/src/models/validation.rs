//! Payload validation errors and shared field checks.

use thiserror::Error;

use super::patch::Patch;

/// A request payload failed validation before reaching storage.
///
/// Messages are user-facing (Portuguese, like the rest of the wire surface)
/// and always name the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Campo obrigatório vazio: {field}")]
    Empty { field: &'static str },

    #[error("Campo obrigatório não pode ser nulo: {field}")]
    NullField { field: &'static str },

    #[error("Campo não pode ser negativo: {field}")]
    Negative { field: &'static str },

    #[error("Nenhum dado fornecido para atualização")]
    NoFields,
}

/// Required text must have visible content.
pub(crate) fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// A patch over a NOT NULL text column: `null` is rejected, a value must be
/// non-blank, and an omitted field is fine.
pub(crate) fn require_text_patch(
    patch: &Patch<String>,
    field: &'static str,
) -> Result<(), ValidationError> {
    match patch {
        Patch::Missing => Ok(()),
        Patch::Null => Err(ValidationError::NullField { field }),
        Patch::Value(value) => require_text(value, field),
    }
}

pub(crate) fn require_non_negative(value: i32, field: &'static str) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

/// A patch over a NOT NULL, non-negative integer column.
pub(crate) fn require_count_patch(
    patch: &Patch<i32>,
    field: &'static str,
) -> Result<(), ValidationError> {
    match patch {
        Patch::Missing => Ok(()),
        Patch::Null => Err(ValidationError::NullField { field }),
        Patch::Value(value) => require_non_negative(*value, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            require_text("   ", "nome"),
            Err(ValidationError::Empty { field: "nome" })
        );
        assert_eq!(require_text("Maria", "nome"), Ok(()));
    }

    #[test]
    fn null_patch_on_required_column_is_rejected() {
        assert_eq!(
            require_text_patch(&Patch::Null, "situacao"),
            Err(ValidationError::NullField { field: "situacao" })
        );
        assert_eq!(require_text_patch(&Patch::Missing, "situacao"), Ok(()));
    }

    #[test]
    fn negative_count_is_rejected() {
        assert_eq!(
            require_count_patch(&Patch::Value(-1), "capacidade"),
            Err(ValidationError::Negative { field: "capacidade" })
        );
        assert_eq!(require_count_patch(&Patch::Value(0), "capacidade"), Ok(()));
    }

    #[test]
    fn messages_name_the_field() {
        let err = ValidationError::Empty { field: "cpf" };
        assert_eq!(err.to_string(), "Campo obrigatório vazio: cpf");
    }
}
