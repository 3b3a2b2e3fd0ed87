//! Standardized field names
//!
//! Source keys are mapped to Spanish column names through an ordered
//! dictionary: exact match first, then the first pattern (in declared order)
//! contained in the lower-cased key, then a plain camelCase to snake_case
//! conversion.

use once_cell::sync::Lazy;
use regex::Regex;

static UPPERCASE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());

/// Source key pattern to standardized name, in match priority order.
///
/// Short patterns sit at the end so that longer, more specific patterns win
/// substring matches ("message" must not become "edad").
pub const STANDARD_NAMES: &[(&str, &str)] = &[
    // identity
    ("full_name", "nombre_completo"),
    ("fullName", "nombre_completo"),
    ("fullname", "nombre_completo"),
    ("first_name", "nombre"),
    ("firstName", "nombre"),
    ("given_name", "nombre"),
    ("last_name", "apellido"),
    ("lastName", "apellido"),
    ("surname", "apellido"),
    ("family_name", "apellido"),
    ("username", "usuario"),
    ("user_name", "usuario"),
    ("login", "usuario"),
    ("name", "nombre"),
    ("gender", "genero"),
    // contact
    ("email", "correo"),
    ("e-mail", "correo"),
    ("mail", "correo"),
    ("phone", "telefono"),
    ("telephone", "telefono"),
    ("mobile", "movil"),
    ("cellphone", "celular"),
    ("fax", "fax"),
    // dates
    ("created_at", "fecha_creacion"),
    ("createdAt", "fecha_creacion"),
    ("created", "fecha_creacion"),
    ("updated_at", "fecha_actualizacion"),
    ("updatedAt", "fecha_actualizacion"),
    ("updated", "fecha_actualizacion"),
    ("deleted_at", "fecha_eliminacion"),
    ("deletedAt", "fecha_eliminacion"),
    ("birth_date", "fecha_nacimiento"),
    ("birthdate", "fecha_nacimiento"),
    ("birthday", "fecha_nacimiento"),
    ("timestamp", "marca_tiempo"),
    ("date", "fecha"),
    // status
    ("status", "estado"),
    ("active", "activo"),
    ("enabled", "habilitado"),
    ("verified", "verificado"),
    // description
    ("description", "descripcion"),
    ("title", "titulo"),
    ("summary", "resumen"),
    ("notes", "notas"),
    ("comment", "comentario"),
    ("message", "mensaje"),
    ("body", "contenido"),
    ("text", "texto"),
    // location
    ("address", "direccion"),
    ("street", "calle"),
    ("city", "ciudad"),
    ("country", "pais"),
    ("province", "provincia"),
    ("state", "estado"),
    ("region", "region"),
    ("postal_code", "codigo_postal"),
    ("postalCode", "codigo_postal"),
    ("zipcode", "codigo_postal"),
    ("latitude", "latitud"),
    ("longitude", "longitud"),
    // urls
    ("website", "sitio_web"),
    ("homepage", "sitio_web"),
    ("avatar", "avatar"),
    ("image", "imagen"),
    ("photo", "foto"),
    ("thumbnail", "miniatura"),
    ("link", "enlace"),
    ("url", "url"),
    // metrics
    ("price", "precio"),
    ("amount", "monto"),
    ("quantity", "cantidad"),
    ("total", "total"),
    ("count", "conteo"),
    ("score", "puntuacion"),
    ("rating", "calificacion"),
    ("views", "vistas"),
    ("likes", "me_gusta"),
    // organisation
    ("company", "empresa"),
    ("department", "departamento"),
    ("category", "categoria"),
    ("role", "rol"),
    ("tags", "etiquetas"),
    ("type", "tipo"),
    // short patterns
    ("uuid", "uuid"),
    ("age", "edad"),
    ("lat", "latitud"),
    ("lng", "longitud"),
    ("lon", "longitud"),
    ("zip", "codigo_postal"),
    ("dob", "fecha_nacimiento"),
    ("id", "id"),
];

/// Propose a standardized name for a source key
pub fn generate_standard_name(key: &str) -> String {
    if let Some((_, standard)) = STANDARD_NAMES.iter().find(|(pattern, _)| *pattern == key) {
        return standard.to_string();
    }

    let lower = key.to_lowercase();
    if let Some((_, standard)) = STANDARD_NAMES
        .iter()
        .find(|(pattern, _)| lower.contains(&pattern.to_lowercase()))
    {
        return standard.to_string();
    }

    to_snake_case(key)
}

/// camelCase to snake_case: underscore before each ASCII capital, lower-cased,
/// one leading underscore removed
pub fn to_snake_case(key: &str) -> String {
    let snake = UPPERCASE_REGEX.replace_all(key, "_$0").to_lowercase();
    match snake.strip_prefix('_') {
        Some(stripped) => stripped.to_string(),
        None => snake,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(generate_standard_name("email"), "correo");
        assert_eq!(generate_standard_name("created_at"), "fecha_creacion");
        assert_eq!(generate_standard_name("status"), "estado");
        assert_eq!(generate_standard_name("full_name"), "nombre_completo");
        assert_eq!(generate_standard_name("age"), "edad");
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        // "Email" is not an exact entry, but still matches by substring
        assert_eq!(generate_standard_name("Email"), "correo");
        assert_eq!(generate_standard_name("CreatedAt"), "fecha_creacion");
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(generate_standard_name("userEmail"), "correo");
        assert_eq!(generate_standard_name("contact_phone_number"), "telefono");
        assert_eq!(generate_standard_name("CustomerID"), "id");
    }

    #[test]
    fn test_substring_declared_order_wins() {
        // both "name" and "id" occur; "name" is declared first
        assert_eq!(generate_standard_name("name_id"), "nombre");
        // "message" contains "age", but "message" is declared earlier
        assert_eq!(generate_standard_name("error_message"), "mensaje");
        // "country" contains "count"; location is declared before metrics
        assert_eq!(generate_standard_name("country_code"), "pais");
    }

    #[test]
    fn test_snake_case_fallback() {
        assert_eq!(generate_standard_name("weirdFieldXyz"), "weird_field_xyz");
        assert_eq!(generate_standard_name("Foo"), "foo");
        assert_eq!(generate_standard_name("plain"), "plain");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("XMLBlob"), "x_m_l_blob");
        assert_eq!(to_snake_case("_private"), "private");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }
}
