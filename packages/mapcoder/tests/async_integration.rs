use mapcoder::{
    AsyncMapDecoder, AsyncMapEncoder, DecodeError, Decodable, Decoder, EncodeError, Encodable,
    Encoder, Map, MapDecoder, MapEncoder, Value,
};

#[derive(Debug, PartialEq, Clone)]
struct Job {
    id: u64,
    steps: Vec<String>,
}

impl Encodable for Job {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        let mut container = encoder.keyed_container();
        container.encode("id", &self.id)?;
        container.encode("steps", &self.steps)
    }
}

impl Decodable for Job {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let mut container = decoder.keyed_container()?;
        Ok(Job {
            id: container.decode("id")?,
            steps: container.decode("steps")?,
        })
    }
}

#[tokio::test]
async fn test_async_round_trip() {
    let job = Job {
        id: 7,
        steps: vec!["fetch".to_string(), "build".to_string()],
    };

    let map = MapEncoder::new().encode_async(&job).await.unwrap();
    assert_eq!(map.get("id"), Some(&Value::from(7u64)));

    let recovered: Job = MapDecoder::new().decode_async(map).await.unwrap();
    assert_eq!(recovered, job);
}

#[tokio::test]
async fn test_async_across_tasks() {
    let encoder = MapEncoder::new();
    let decoder = MapDecoder::new();

    let handles: Vec<_> = (0..4u64)
        .map(|id| {
            let encoder = encoder.clone();
            let decoder = decoder.clone();
            tokio::spawn(async move {
                let job = Job {
                    id,
                    steps: vec![format!("step-{}", id)],
                };
                let map = encoder.encode_async(&job).await?;
                let back: Job = decoder.decode_async(map).await.map_err(|err| {
                    EncodeError::invalid_value(err.path().clone(), err.to_string())
                })?;
                Ok::<_, EncodeError>((job, back))
            })
        })
        .collect();

    for handle in handles {
        let (job, back) = handle.await.unwrap().unwrap();
        assert_eq!(job, back);
    }
}

#[tokio::test]
async fn test_async_decode_error_path() {
    let map = Map::from_iter([
        ("id".to_string(), Value::from(1u64)),
        ("steps".to_string(), Value::from(vec![Value::from("ok"), Value::from(3i32)])),
    ]);
    let err = MapDecoder::new().decode_async::<Job>(map).await.unwrap_err();
    assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    assert_eq!(err.path(), &mapcoder::path!("steps/1"));
}
