#[actix_web::main]
async fn main() -> std::io::Result<()> {
    sale_deed_server::run().await
}
