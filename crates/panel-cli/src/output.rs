use serde::Serialize;

/// Envelope every command prints on stdout: either `data` or `error` is
/// present, never both.
#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub client_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
struct ListEnvelope<'a, T: Serialize> {
    items: &'a [T],
    count: usize,
}

pub fn output_success<T: Serialize>(data: T) {
    let response = CliResponse {
        success: true,
        client_version: env!("CARGO_PKG_VERSION"),
        data: Some(data),
        error: None,
    };
    println!("{}", serde_json::to_string(&response).unwrap());
}

/// Prints entities straight from the store's slices, with the count
/// alongside.
pub fn output_list<T: Serialize>(items: &[T]) {
    output_success(ListEnvelope {
        items,
        count: items.len(),
    });
}

/// Prints the failure envelope to stderr and exits with code 1; never
/// returns.
pub fn output_error(message: &str) -> ! {
    let response: CliResponse<()> = CliResponse {
        success: false,
        client_version: env!("CARGO_PKG_VERSION"),
        data: None,
        error: Some(message.to_string()),
    };
    eprintln!("{}", serde_json::to_string(&response).unwrap());
    std::process::exit(1);
}
