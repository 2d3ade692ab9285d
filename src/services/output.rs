use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use crate::error::AuditError;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    ok: bool,
    data: T,
    text: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok, data })?
        );
    } else {
        print!("{}", text(&data));
    }
    Ok(())
}

pub fn print_error(json: bool, err: &AuditError) {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: err.code().to_string(),
                message: err.to_string(),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(s) => println!("{}", s),
            Err(_) => eprintln!("error: {}", err),
        }
    } else {
        eprintln!("error: {}", err);
    }
}
