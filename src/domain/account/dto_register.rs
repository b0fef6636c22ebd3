/// Registration input as received from the caller.
///
/// `birth_date` is still raw text here; the service parses it.
#[derive(Debug, Clone)]
pub struct RegisterAccountDto {
    pub full_name: String,
    pub birth_date: String,
    pub email: String,
    pub password: String,
}
