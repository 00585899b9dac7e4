//{
#[tokio::main]
async fn main() -> std::io::Result<()> {
    //}
    use {
        tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
        uds_listen::ListenerOptions,
    };

    let path = "/tmp/uds-listen-tokio-example.sock";

    // The socket file is deleted when the listener goes away. A server killed
    // before that happens leaves a stale file, which the next run replaces.
    let listener = ListenerOptions::new().path(path).reclaim_name(true).create_tokio()?;
    eprintln!("Server running at {path}");

    loop {
        let (conn, _) = match listener.inner().accept().await {
            Ok(c) => c,
            Err(e) => {
                eprintln!("There was an error with an incoming connection: {e}");
                continue;
            }
        };
        tokio::spawn(async move {
            let (recver, mut sender) = conn.into_split();
            let mut recver = BufReader::new(recver);
            let mut buffer = String::with_capacity(128);
            recver.read_line(&mut buffer).await?;
            sender.write_all(b"Hello from server!\n").await?;
            print!("Client answered: {buffer}");
            std::io::Result::Ok(())
        });
    }
    //{
} //}
