use std::path::Path;

use crate::audio::domain::audio_buffer::AudioBuffer;
use crate::audio::domain::audio_reader::AudioReader;

/// Decodes any ffmpeg-readable file to mono f32 PCM using ffmpeg-next.
pub struct FfmpegAudioReader;

impl FfmpegAudioReader {
    fn open_decoder(
        ictx: &ffmpeg_next::format::context::Input,
        path: &Path,
    ) -> Result<(usize, ffmpeg_next::codec::decoder::Audio), Box<dyn std::error::Error>> {
        let audio_stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or_else(|| format!("No audio stream found in {}", path.display()))?;

        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(audio_stream.parameters())?;
        let decoder = codec_ctx.decoder().audio()?;
        Ok((audio_stream.index(), decoder))
    }
}

impl AudioReader for FfmpegAudioReader {
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<AudioBuffer, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(path)?;
        let (audio_stream_index, mut decoder) = Self::open_decoder(&ictx, path)?;
        log::debug!(
            "Source audio: {} Hz, {} ch",
            decoder.rate(),
            decoder.channels()
        );

        // Some containers leave the layout unset for mono/stereo sources
        let source_layout = if decoder.channel_layout().is_empty() {
            ffmpeg_next::ChannelLayout::default(decoder.channels() as i32)
        } else {
            decoder.channel_layout()
        };

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            source_layout,
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Planar),
            ffmpeg_next::ChannelLayout::MONO,
            target_sample_rate,
        )?;

        let mut all_samples: Vec<f32> = Vec::new();
        let mut decoded_frame = ffmpeg_next::util::frame::audio::Audio::empty();
        let mut resampled_frame = ffmpeg_next::util::frame::audio::Audio::empty();

        for (stream, packet) in ictx.packets() {
            if stream.index() != audio_stream_index {
                continue;
            }

            decoder.send_packet(&packet)?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                resampler.run(&decoded_frame, &mut resampled_frame)?;
                extract_f32_samples(&resampled_frame, &mut all_samples);
            }
        }

        decoder.send_eof()?;
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            resampler.run(&decoded_frame, &mut resampled_frame)?;
            extract_f32_samples(&resampled_frame, &mut all_samples);
        }

        // The resampler may still hold buffered samples
        if let Ok(Some(delay)) = resampler.flush(&mut resampled_frame) {
            if delay.output > 0 {
                extract_f32_samples(&resampled_frame, &mut all_samples);
            }
        }

        log::debug!(
            "Decoded {} samples at {target_sample_rate} Hz from {}",
            all_samples.len(),
            path.display()
        );

        Ok(AudioBuffer::new(all_samples, target_sample_rate))
    }
}

/// Extract f32 samples from a planar mono resampled frame.
fn extract_f32_samples(frame: &ffmpeg_next::util::frame::audio::Audio, out: &mut Vec<f32>) {
    let num_samples = frame.samples();
    if num_samples == 0 {
        return;
    }
    out.extend_from_slice(&frame.plane::<f32>(0)[..num_samples]);
}
