use fintrack_api::{Client, FintrackApiError, Request};

#[tokio::main]
pub async fn main() -> Result<(), FintrackApiError> {
    let client = Client::with_token("http://localhost:9080", "jwt_token");

    let req = Request::expenses().list(1, 10);

    let res = client.send(req).await?;
    println!("{} expenses, {} pages", res.expenses.len(), res.total_pages);
    Ok(())
}
