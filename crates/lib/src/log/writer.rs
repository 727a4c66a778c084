use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::EitherWriter;

/// Sends ERROR and WARN events to one writer and everything else to another.
#[derive(Debug, Clone)]
pub struct StreamRouter<E, O> {
  err: E,
  out: O,
}

impl<E, O> StreamRouter<E, O> {
  pub fn new(err: E, out: O) -> Self {
    Self { err, out }
  }
}

impl<'a, E, O> MakeWriter<'a> for StreamRouter<E, O>
where
  E: MakeWriter<'a>,
  O: MakeWriter<'a>,
{
  type Writer = EitherWriter<E::Writer, O::Writer>;

  fn make_writer(&'a self) -> Self::Writer {
    EitherWriter::B(self.out.make_writer())
  }

  fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
    // Levels compare by verbosity, so ERROR < WARN < INFO.
    if *meta.level() <= Level::WARN {
      EitherWriter::A(self.err.make_writer_for(meta))
    } else {
      EitherWriter::B(self.out.make_writer_for(meta))
    }
  }
}
