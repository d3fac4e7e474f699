use crate::annotation::provider::Annotator;
use crate::engine::gloss::translate;
use crate::types::annotation::GlossResult;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Messages delivered to the translation worker. Speech capture runs
/// somewhere else entirely; all this module sees is recognized text.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Recognized(String),
    Stop,
}

/// One translated utterance, ready for avatar rendering or logging.
#[derive(Debug, Clone, PartialEq)]
pub struct GlossUpdate {
    pub source_text: String,
    pub result: GlossResult,
}

/// Spawns the worker that owns the pipeline. Recognized text arrives on
/// `speech_rx`, translated updates leave on `update_tx`; the single-writer
/// discipline lives in the channels, not in shared state.
///
/// A failed translation (annotator contract violation) is logged and
/// skipped so one bad utterance cannot take the relay down. The worker
/// exits on `Stop` or when either channel disconnects.
pub fn start_translation_worker<A>(
    annotator: A,
    speech_rx: Receiver<SpeechEvent>,
    update_tx: Sender<GlossUpdate>,
) -> JoinHandle<()>
where
    A: Annotator + 'static,
{
    thread::spawn(move || {
        while let Ok(event) = speech_rx.recv() {
            let text = match event {
                SpeechEvent::Recognized(text) => text,
                SpeechEvent::Stop => break,
            };

            match translate(&text, &annotator) {
                Ok(result) => {
                    let update = GlossUpdate {
                        source_text: text,
                        result,
                    };
                    if update_tx.send(update).is_err() {
                        // Consumer hung up; nothing left to translate for.
                        break;
                    }
                }
                Err(e) => {
                    eprintln!("Warning: dropping utterance '{}': {}", text, e);
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::rule_tagger::RuleTagger;
    use crate::types::annotation::FacialMarker;
    use std::sync::mpsc;

    #[test]
    fn worker_translates_each_recognized_utterance_in_order() {
        let (speech_tx, speech_rx) = mpsc::channel();
        let (update_tx, update_rx) = mpsc::channel();
        let handle = start_translation_worker(RuleTagger::new(), speech_rx, update_tx);

        speech_tx
            .send(SpeechEvent::Recognized("Call the police.".to_string()))
            .unwrap();
        speech_tx
            .send(SpeechEvent::Recognized("Where is the hospital?".to_string()))
            .unwrap();
        speech_tx.send(SpeechEvent::Stop).unwrap();

        let first = update_rx.recv().unwrap();
        assert_eq!(first.source_text, "Call the police.");
        assert_eq!(first.result.gloss, vec!["CALL", "POLICE"]);
        assert_eq!(first.result.facial_marker, FacialMarker::Neutral);

        let second = update_rx.recv().unwrap();
        assert_eq!(second.result.gloss, vec!["HOSPITAL", "WHERE"]);
        assert_eq!(second.result.facial_marker, FacialMarker::FurrowedBrows);

        handle.join().unwrap();
        assert!(update_rx.recv().is_err());
    }

    #[test]
    fn worker_exits_when_speech_channel_disconnects() {
        let (speech_tx, speech_rx) = mpsc::channel::<SpeechEvent>();
        let (update_tx, _update_rx) = mpsc::channel();
        let handle = start_translation_worker(RuleTagger::new(), speech_rx, update_tx);

        drop(speech_tx);
        handle.join().unwrap();
    }
}
