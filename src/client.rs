use std::env;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

use kv_server::server::commands::has_report;
use kv_server::server::Utf8FrameCodec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: kv-client <port> <command...>");
        return Ok(());
    }

    let port: u16 = args[1].parse()?;
    let request = args[2..].join(" ");

    let stream = TcpStream::connect(("127.0.0.1", port)).await?;
    let mut framed = Framed::new(stream, Utf8FrameCodec::new());

    // Send the request
    framed.send(request.as_str()).await?;

    // Read the response; a successful SELECTED is followed by the client listing
    let mut more = true;
    while more {
        match framed.next().await {
            Some(reply) => {
                let reply = reply?;
                println!("Response: {}", reply);
                more = has_report(&reply);
            }
            None => {
                eprintln!("Connection closed by server");
                break;
            }
        }
    }

    Ok(())
}
