use anyhow::Result;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use std::{fs::File, path::Path, time::Duration};

/// The seam between the element loop and the actual audio output.
pub trait AudioBackend {
    fn load(&mut self, path: &Path, autoplay: bool) -> Result<()>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    fn seek_to(&mut self, pos: Duration) -> Result<()>;
    fn position(&self) -> Duration;
    fn is_paused(&self) -> bool;
    /// The sink has drained its source.
    fn finished(&self) -> bool;
}

pub struct RodioBackend {
    sink: Sink,
    _stream: OutputStream,
}

impl RodioBackend {
    pub fn new() -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream()?;
        let sink = Sink::connect_new(stream.mixer());

        Ok(RodioBackend {
            sink,
            _stream: stream,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &Path, autoplay: bool) -> Result<()> {
        let file = File::open(path)?;
        let source = Decoder::try_from(file)?;

        self.sink.clear();
        self.sink.append(source);

        if autoplay {
            self.sink.play();
        }

        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn resume(&mut self) {
        self.sink.play();
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn seek_to(&mut self, pos: Duration) -> Result<()> {
        self.sink
            .try_seek(pos)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    fn finished(&self) -> bool {
        self.sink.empty()
    }
}
